//! Support for library configuration options

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

/// The shared secret that opens the admin surface.
///
/// Feel free to override it when initing this library. Keeping it in the
/// client is a deliberate parity choice, not an endorsement: this is a
/// convenience gate, not authentication.
pub static ADMIN_SECRET: Lazy<Arc<Mutex<String>>> =
    Lazy::new(|| Arc::new(Mutex::new("admin2025".to_string())));

//! The gate in front of the admin surface
//!
//! A single shared secret, compared in memory, grants admin access for
//! the rest of the session. There is no token, no expiry and no
//! persistence across reloads; logging out resets the flag and cleans
//! the entry marker off the visible URL.

use url::Url;

use crate::config;
use crate::localization::{translate, Language};

/// The query parameter whose presence reveals the login gate instead of
/// the public timeline
static ADMIN_QUERY_MARKER: &str = "admin";

/// Whether this URL asks for the admin surface.
///
/// Only the marker's presence counts, its value (if any) is ignored.
pub fn admin_entry_requested(url: &Url) -> bool {
    url.query_pairs().any(|(key, _)| key == ADMIN_QUERY_MARKER)
}

/// The same URL without the admin entry marker, other parameters kept
pub fn strip_admin_marker(url: &Url) -> Url {
    let remaining: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != ADMIN_QUERY_MARKER)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    if remaining.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned
            .query_pairs_mut()
            .clear()
            .extend_pairs(remaining.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    cleaned
}

/// The in-memory admin session flag, guarded by the shared secret
pub struct AccessGate {
    is_admin: bool,
}

impl AccessGate {
    pub fn new() -> Self {
        Self { is_admin: false }
    }

    /// Whether this session has admin access
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Compare an attempt against [`config::ADMIN_SECRET`]. On a match the
    /// session is admin until [`log_out`](Self::log_out).
    pub fn log_in(&mut self, attempt: &str) -> bool {
        let expected = config::ADMIN_SECRET.lock().unwrap().clone();
        if attempt == expected {
            self.is_admin = true;
            true
        } else {
            log::info!("Rejected an admin login attempt");
            false
        }
    }

    /// The localized message for a rejected attempt
    pub fn failure_message(language: Language) -> &'static str {
        translate(language, "incorrectPassword")
    }

    /// Drop admin access and return the URL to show instead of
    /// `current_url`, with the entry marker stripped.
    ///
    /// This is the whole teardown: the gate holds no other state, and
    /// everything derived from the admin flag must be reset by the caller
    /// in the same breath.
    pub fn log_out(&mut self, current_url: &Url) -> Url {
        self.is_admin = false;
        strip_admin_marker(current_url)
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}

//! This module provides ways to tweak the in-process store, so that it can return errors on some tests
#![cfg(feature = "memory_store_mocks_remote_store")]

use crate::store::StoreError;

/// This stores some behaviour tweaks, that describe how a mocked store will behave during a given test
///
/// So that a function fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub subscribe_behaviour: (u32, u32),
    pub create_behaviour: (u32, u32),
    pub patch_behaviour: (u32, u32),
    pub delete_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            subscribe_behaviour: (0, n_fails),
            create_behaviour: (0, n_fails),
            patch_behaviour: (0, n_fails),
            delete_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_subscribe(&mut self) -> Result<(), StoreError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.subscribe_behaviour, "subscribe").map_err(StoreError::Unavailable)
    }
    pub fn can_create(&mut self) -> Result<(), StoreError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.create_behaviour, "create").map_err(StoreError::WriteFailed)
    }
    pub fn can_patch(&mut self) -> Result<(), StoreError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.patch_behaviour, "patch").map_err(StoreError::WriteFailed)
    }
    pub fn can_delete(&mut self) -> Result<(), StoreError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.delete_behaviour, "delete").map_err(StoreError::WriteFailed)
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), String> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else {
        if remaining_failures > 0 {
            value.1 = value.1 - 1;
            log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
            Err(format!(
                "Mocked behaviour requires this {} to fail this time. ({:?})",
                descr, value
            ))
        } else {
            log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..7 {
            assert!(ok.can_create().is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_create().is_err());
        assert!(now.can_patch().is_err());
        assert!(now.can_patch().is_err());
        assert!(now.can_create().is_err());
        assert!(now.can_create().is_ok());
        assert!(now.can_create().is_ok());
        assert!(now.can_patch().is_ok());

        let mut custom = MockBehaviour {
            create_behaviour: (0, 1),
            delete_behaviour: (1, 3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_create().is_err());
        assert!(custom.can_create().is_ok());
        assert!(custom.can_create().is_ok());
        assert!(custom.can_delete().is_ok());
        assert!(custom.can_delete().is_err());
        assert!(custom.can_delete().is_err());
        assert!(custom.can_delete().is_err());
        assert!(custom.can_delete().is_ok());
        assert!(custom.can_delete().is_ok());

        let mut suspended = MockBehaviour::fail_now(2);
        suspended.suspend();
        assert!(suspended.can_subscribe().is_ok());
        suspended.resume();
        assert!(suspended.can_subscribe().is_err());
    }
}

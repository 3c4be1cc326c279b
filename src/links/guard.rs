//! Edit authorization: decides whether a write to a filename is permitted.
//!
//! Per-filename policy, evaluated at write time:
//! - no existing record: always allowed
//! - record with a password hash: allowed only with a matching password
//! - open record (no password): allowed only within the edit-expiration
//!   window since its last write
//!
//! Reads never consult this guard; retrieval by filename is always permitted.

use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::error::ServiceError;
use crate::links::password;
use crate::store::StoredLink;

#[derive(Clone)]
pub struct EditGuard {
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl EditGuard {
    pub fn new(window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { window, clock }
    }

    /// Check whether a write over `existing` is allowed with the supplied
    /// password. `Ok(())` means the caller may proceed with exactly one put;
    /// any `Err` means storage must be left untouched.
    pub fn authorize(
        &self,
        existing: Option<&StoredLink>,
        supplied_password: Option<&str>,
    ) -> Result<(), ServiceError> {
        let Some(record) = existing else {
            // First save of this filename.
            return Ok(());
        };

        match &record.password_hash {
            Some(stored_hash) => {
                let matches = supplied_password
                    .map(|pwd| password::verify_password(pwd, stored_hash))
                    .unwrap_or(false);
                if matches {
                    Ok(())
                } else {
                    Err(ServiceError::AuthorizationFailed {
                        filename: record.filename.clone(),
                    })
                }
            }
            None => {
                // Open record: editable only within the expiration window.
                let age = self.clock.now() - record.last_modified;
                if age <= self.window {
                    Ok(())
                } else {
                    Err(ServiceError::EditWindowExpired {
                        window_days: self.window.num_days(),
                    })
                }
            }
        }
    }
}

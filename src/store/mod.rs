pub mod fs;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fs::FsLinkStore;
pub use memory::MemoryLinkStore;

/// The persisted record for one shortened link.
///
/// A record is created on the first save of a filename and overwritten
/// wholesale on each subsequent (authorized) save. `password_hash` is set the
/// first time a password is supplied for the filename and is never cleared by
/// a later save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLink {
    /// Unique key. May contain `/` to emulate hierarchical organization.
    pub filename: String,
    /// The opaque viewer state blob.
    pub payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Argon2id PHC hash string, if a password was ever set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
}

/// Key-value object storage for link records, keyed by filename.
///
/// A `put` replaces the full record in a single atomic write; there are no
/// partial updates. The read-check-write sequence around it is not locked,
/// so two concurrent writers that both pass the authorization check race
/// and the last write wins.
pub trait LinkStore: Send + Sync {
    fn get(&self, filename: &str) -> Result<Option<StoredLink>, StoreError>;
    fn put(&self, link: &StoredLink) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

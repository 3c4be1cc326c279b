//! In-memory link storage, used by unit tests and available as a
//! non-persistent backend.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{LinkStore, StoreError, StoredLink};

#[derive(Default)]
pub struct MemoryLinkStore {
    links: Mutex<HashMap<String, StoredLink>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkStore for MemoryLinkStore {
    fn get(&self, filename: &str) -> Result<Option<StoredLink>, StoreError> {
        let links = self
            .links
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("store lock: {}", e)))?;
        Ok(links.get(filename).cloned())
    }

    fn put(&self, link: &StoredLink) -> Result<(), StoreError> {
        let mut links = self
            .links
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("store lock: {}", e)))?;
        links.insert(link.filename.clone(), link.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let links = self
            .links
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("store lock: {}", e)))?;
        let mut names: Vec<String> = links.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

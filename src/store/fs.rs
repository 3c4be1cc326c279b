//! Filesystem-backed link storage.
//!
//! Each record is one JSON document at `{data_dir}/short/{filename}`.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! put is a single atomic replacement of the full record.

use std::path::{Path, PathBuf};

use super::{LinkStore, StoreError, StoredLink};

pub struct FsLinkStore {
    root: PathBuf,
}

impl FsLinkStore {
    /// Open (creating if needed) the store rooted at `{data_dir}/short`.
    pub fn open(data_dir: &str) -> Result<Self, StoreError> {
        let root = Path::new(data_dir).join("short");
        std::fs::create_dir_all(&root)
            .map_err(|e| StoreError::Unavailable(format!("failed to create store dir: {}", e)))?;
        Ok(Self { root })
    }

    fn record_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

impl LinkStore for FsLinkStore {
    fn get(&self, filename: &str) -> Result<Option<StoredLink>, StoreError> {
        let path = self.record_path(filename);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "failed to read record {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let record: StoredLink = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Unavailable(format!("corrupt record {}: {}", path.display(), e))
        })?;
        Ok(Some(record))
    }

    fn put(&self, link: &StoredLink) -> Result<(), StoreError> {
        let path = self.record_path(&link.filename);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("failed to create record dir: {}", e))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(link)
            .map_err(|e| StoreError::Unavailable(format!("failed to encode record: {}", e)))?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &bytes).map_err(|e| {
            StoreError::Unavailable(format!("failed to write record {}: {}", path.display(), e))
        })?;
        std::fs::rename(&tmp_path, &path).map_err(|e| {
            StoreError::Unavailable(format!("failed to commit record {}: {}", path.display(), e))
        })?;

        tracing::debug!("Stored record {}", link.filename);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut filenames = Vec::new();
        collect_records(&self.root, Path::new(""), &mut filenames)?;
        filenames.sort();
        Ok(filenames)
    }
}

fn collect_records(
    dir: &Path,
    relative: &Path,
    filenames: &mut Vec<String>,
) -> Result<(), StoreError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| StoreError::Unavailable(format!("failed to list {}: {}", dir.display(), e)))?;
    for entry in entries {
        let entry = entry
            .map_err(|e| StoreError::Unavailable(format!("failed to list records: {}", e)))?;
        let name = entry.file_name();
        let rel = relative.join(&name);
        let path = entry.path();
        if path.is_dir() {
            collect_records(&path, &rel, filenames)?;
        } else if path.extension().and_then(|e| e.to_str()) != Some("tmp") {
            filenames.push(rel.to_string_lossy().into_owned());
        }
    }
    Ok(())
}

//! services/catalog/src/adapters/file_storage.rs
//!
//! This module contains the file-backed key-value adapter, the concrete
//! implementation of the `KeyValueStorage` port used by the `prints` binary.
//! Each key is a JSON file inside the data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use print_catalog_core::{KeyValueStorage, PortError, PortResult};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that keeps one file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    /// Creates a new `FileStorage`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes: None,
        }
    }

    /// Caps the size of any single value, like a browser storage quota.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

fn unexpected(action: &str, path: &Path, e: std::io::Error) -> PortError {
    PortError::Unexpected(format!("failed to {} {}: {}", action, path.display(), e))
}

//=========================================================================================
// `KeyValueStorage` Trait Implementation
//=========================================================================================

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unexpected("read", &path, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> PortResult<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(PortError::QuotaExceeded(format!(
                    "{} bytes for '{}' exceeds the {} byte quota",
                    value.len(),
                    key,
                    quota
                )));
            }
        }

        fs::create_dir_all(&self.dir).map_err(|e| unexpected("create", &self.dir, e))?;

        // Write to a sibling file first so a crash never leaves a half-written list.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value).map_err(|e| unexpected("write", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| unexpected("replace", &path, e))?;

        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_is_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("prints_data").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_overwrites() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("prints_data", "[1]").unwrap();
        storage.set_item("prints_data", "[2]").unwrap();

        assert_eq!(storage.get_item("prints_data").unwrap().as_deref(), Some("[2]"));
        assert!(storage.path_for("prints_data").exists());
        assert!(!dir.path().join("nested/prints_data.json.tmp").exists());
    }

    #[test]
    fn quota_rejects_large_values_and_keeps_old_content() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).with_quota(Some(4));
        storage.set_item("k", "ok").unwrap();

        let err = storage.set_item("k", "too long").unwrap_err();

        assert!(matches!(err, PortError::QuotaExceeded(_)));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("ok"));
    }

    #[test]
    fn unreadable_value_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        fs::create_dir_all(storage.path_for("k")).unwrap();

        assert!(storage.get_item("k").is_err());
    }
}

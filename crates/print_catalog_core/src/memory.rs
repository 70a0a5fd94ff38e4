//! crates/print_catalog_core/src/memory.rs
//!
//! An in-memory `KeyValueStorage`, used in tests and wherever a throwaway
//! catalog is enough.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::ports::{KeyValueStorage, PortError, PortResult};

#[derive(Debug, Default)]
pub struct InMemoryStorage {
    items: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects any single write whose value is larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: Mutex::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds a raw value, bypassing the quota.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> PortResult<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(PortError::QuotaExceeded(format!(
                    "value of {} bytes for '{}' exceeds {} bytes",
                    value.len(),
                    key,
                    quota
                )));
            }
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

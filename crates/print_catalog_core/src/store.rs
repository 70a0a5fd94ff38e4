//! crates/print_catalog_core/src/store.rs
//!
//! The print store: a single JSON array of prints kept under one key of a
//! `KeyValueStorage`. Reads and writes never fail past this boundary. A
//! record list that cannot be read is treated as empty, and a write that
//! cannot be persisted is logged and dropped.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::{NewPrint, Print};
use crate::ports::{KeyValueStorage, PortError};

/// The storage key the catalog lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "prints_data";

//=========================================================================================
// Serialized Record Struct
//=========================================================================================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrintRecord {
    id: String,
    image_url: String,
    title: String,
    labels: Vec<String>,
    created_at: String,
}

impl PrintRecord {
    fn from_domain(print: &Print) -> Self {
        Self {
            id: print.id.clone(),
            image_url: print.image_url.clone(),
            title: print.title.clone(),
            labels: print.labels.clone(),
            created_at: print.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    fn to_domain(self) -> Result<Print, String> {
        if self.id.is_empty() {
            return Err("empty id".to_string());
        }
        if self.title.is_empty() {
            return Err(format!("print {} has an empty title", self.id));
        }
        if self.image_url.is_empty() {
            return Err(format!("print {} has no image", self.id));
        }
        if self.labels.iter().any(String::is_empty) {
            return Err(format!("print {} has an empty label", self.id));
        }
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| format!("print {} has invalid createdAt '{}': {}", self.id, self.created_at, e))?
            .with_timezone(&Utc);

        Ok(Print {
            id: self.id,
            image_url: self.image_url,
            title: self.title,
            labels: self.labels,
            created_at,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("storage read failed: {0}")]
    Storage(#[from] PortError),
    #[error("stored data is not a print list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

//=========================================================================================
// PrintStore
//=========================================================================================

/// Persists the full print list under a single storage key.
#[derive(Clone)]
pub struct PrintStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl PrintStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads every stored print, newest first.
    ///
    /// Absent, unreadable or malformed data yields an empty list.
    pub fn get_all(&self) -> Vec<Print> {
        match self.read_all() {
            Ok(prints) => prints,
            Err(e) => {
                warn!(key = %self.key, "Error loading prints, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn read_all(&self) -> Result<Vec<Print>, LoadError> {
        let Some(data) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let records: Vec<PrintRecord> = serde_json::from_str(&data)?;
        records
            .into_iter()
            .map(|r| r.to_domain().map_err(LoadError::InvalidRecord))
            .collect()
    }

    /// Overwrites the stored list. Failures are logged, never returned.
    pub fn save_all(&self, prints: &[Print]) {
        let records: Vec<PrintRecord> = prints.iter().map(PrintRecord::from_domain).collect();
        let data = match serde_json::to_string(&records) {
            Ok(data) => data,
            Err(e) => {
                error!(key = %self.key, "Error serializing prints: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(&self.key, &data) {
            error!(key = %self.key, count = prints.len(), "Error saving prints: {}", e);
        }
    }

    /// Assigns a fresh id, stores the print at the front of the list and returns it.
    pub fn add(&self, new_print: NewPrint) -> Print {
        let print = new_print.with_id(Uuid::new_v4().to_string());
        let mut prints = self.get_all();
        prints.insert(0, print.clone());
        self.save_all(&prints);
        debug!(id = %print.id, title = %print.title, "Print added");
        print
    }

    /// Removes the print with `id`. Unknown ids are ignored.
    pub fn remove(&self, id: &str) {
        let mut prints = self.get_all();
        prints.retain(|p| p.id != id);
        self.save_all(&prints);
        debug!(id, "Print removed");
    }
}

impl std::fmt::Debug for PrintStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintStore").field("key", &self.key).finish()
    }
}

//! crates/print_catalog_core/src/session.rs
//!
//! The live catalog: the print list currently on screen, its load state and
//! the add-in-progress flag. All mutations go through the `PrintStore`; this
//! type keeps the in-memory list in step with it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{error, info, warn};

use crate::catalog::{label_counts, rank_labels, LabelCount, PrintFilter};
use crate::domain::{NewPrint, Print};
use crate::draft::{PrintDraft, ValidationError, MAX_IMAGE_BYTES};
use crate::ports::{ImageEncoder, PortError};
use crate::store::PrintStore;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("A print is already being added")]
    SubmissionPending,
    #[error("Failed to add the print: {0}")]
    Port(#[from] PortError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
}

/// Clears the in-progress flag when an add finishes, whichever way it exits.
struct UploadGuard<'a>(&'a AtomicBool);

impl<'a> UploadGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PrintCatalog {
    store: PrintStore,
    encoder: Arc<dyn ImageEncoder>,
    max_image_bytes: u64,
    prints: RwLock<Vec<Print>>,
    load_state: RwLock<LoadState>,
    uploading: AtomicBool,
}

impl PrintCatalog {
    pub fn new(store: PrintStore, encoder: Arc<dyn ImageEncoder>) -> Self {
        Self {
            store,
            encoder,
            max_image_bytes: MAX_IMAGE_BYTES,
            prints: RwLock::new(Vec::new()),
            load_state: RwLock::new(LoadState::NotLoaded),
            uploading: AtomicBool::new(false),
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: u64) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    pub fn max_image_bytes(&self) -> u64 {
        self.max_image_bytes
    }

    /// (Re)reads the whole catalog from the store.
    pub fn load(&self) {
        *self.state_mut() = LoadState::Loading;
        let prints = self.store.get_all();
        info!(count = prints.len(), "Prints loaded");
        *self.prints_mut() = prints;
        *self.state_mut() = LoadState::Loaded;
    }

    pub fn load_state(&self) -> LoadState {
        *self.load_state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::Acquire)
    }

    /// A snapshot of the current list, newest first.
    pub fn prints(&self) -> Vec<Print> {
        self.prints_ref().clone()
    }

    pub fn len(&self) -> usize {
        self.prints_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.prints_ref().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Print> {
        self.prints_ref().iter().find(|p| p.id == id).cloned()
    }

    /// Validates, encodes and stores a new print.
    ///
    /// Only one add may be in flight; a second call while one is pending fails
    /// with `SubmissionPending` and stores nothing.
    pub async fn add_print(&self, draft: PrintDraft) -> Result<Print, CatalogError> {
        let valid = draft.validate(self.max_image_bytes)?;
        let _guard = UploadGuard::acquire(&self.uploading).ok_or_else(|| {
            warn!(title = %valid.title, "Rejected submission while another add is pending");
            CatalogError::SubmissionPending
        })?;

        let image_url = self.encoder.encode_data_url(&valid.image).await.map_err(|e| {
            error!(image = %valid.image.name, "Error encoding image: {}", e);
            e
        })?;

        let print = self.store.add(NewPrint {
            image_url,
            title: valid.title,
            labels: valid.labels,
            created_at: Utc::now(),
        });
        self.prints_mut().insert(0, print.clone());
        info!(id = %print.id, title = %print.title, "Print registered");
        Ok(print)
    }

    /// Deletes a print. Unknown ids are ignored.
    pub fn delete_print(&self, id: &str) {
        self.store.remove(id);
        self.prints_mut().retain(|p| p.id != id);
    }

    /// Labels of the current list, most used first.
    pub fn labels(&self) -> Vec<String> {
        rank_labels(&self.prints_ref())
    }

    pub fn label_counts(&self) -> Vec<LabelCount> {
        label_counts(&self.prints_ref())
    }

    pub fn search(&self, filter: &PrintFilter) -> Vec<Print> {
        filter.apply(&self.prints_ref()).into_iter().cloned().collect()
    }

    fn prints_ref(&self) -> RwLockReadGuard<'_, Vec<Print>> {
        self.prints.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn prints_mut(&self) -> RwLockWriteGuard<'_, Vec<Print>> {
        self.prints.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, LoadState> {
        self.load_state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PrintCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintCatalog")
            .field("store", &self.store)
            .field("load_state", &self.load_state())
            .field("uploading", &self.is_uploading())
            .finish()
    }
}

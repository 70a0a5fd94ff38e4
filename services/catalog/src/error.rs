//! services/catalog/src/error.rs
//!
//! Defines the primary error type for the catalog service.

use crate::adapters::PickError;
use crate::config::ConfigError;
use print_catalog_core::{CatalogError, PortError};

/// The primary error type for the `catalog` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error from the catalog workflow (validation, pending submission, encoding).
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Represents a rejected or unreadable image file.
    #[error("{0}")]
    Pick(#[from] PickError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error (e.g., reading the terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! services/catalog/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::collections::HashMap;
use std::path::PathBuf;

use print_catalog_core::{DEFAULT_STORAGE_KEY, MAX_IMAGE_BYTES};
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine a data directory; set PRINTS_DATA_DIR")]
    NoDataDir,
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub max_image_bytes: u64,
    pub storage_quota_bytes: Option<usize>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::from_vars(&vars)
    }

    /// Builds the configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| vars.get(name).map(String::as_str).filter(|v| !v.is_empty());

        // --- Storage Location ---
        let data_dir = match get("PRINTS_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .or_else(dirs::home_dir)
                .map(|dir| dir.join("print-catalog"))
                .ok_or(ConfigError::NoDataDir)?,
        };

        let storage_key = get("PRINTS_STORAGE_KEY")
            .unwrap_or(DEFAULT_STORAGE_KEY)
            .to_string();
        if storage_key.contains(['/', '\\']) || storage_key.starts_with('.') {
            return Err(ConfigError::InvalidValue(
                "PRINTS_STORAGE_KEY".to_string(),
                format!("'{}' cannot be used as a file name", storage_key),
            ));
        }

        // --- Limits ---
        let max_image_bytes = match get("PRINTS_MAX_IMAGE_BYTES") {
            Some(raw) => parse_number("PRINTS_MAX_IMAGE_BYTES", raw)?,
            None => MAX_IMAGE_BYTES,
        };

        let storage_quota_bytes = get("PRINTS_STORAGE_QUOTA_BYTES")
            .map(|raw| parse_number("PRINTS_STORAGE_QUOTA_BYTES", raw))
            .transpose()?;

        // --- Logging ---
        let log_level_str = get("RUST_LOG").unwrap_or("INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            data_dir,
            storage_key,
            max_image_bytes,
            storage_quota_bytes,
            log_level,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| {
        ConfigError::InvalidValue(name.to_string(), format!("'{}' is not a byte count", raw))
    })
}

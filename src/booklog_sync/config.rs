//! Runtime configuration, loaded from a YAML file.
//!
//! Both keys are required; a missing file, a missing key, or an empty
//! value fails fast before any sync work starts.

use crate::error::{Result, SyncError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Path to the Booklog CSV export.
    pub csv_path: PathBuf,
    /// Directory of book notes inside the vault.
    pub books_path: PathBuf,
}

impl SyncConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let config: SyncConfig = serde_yaml::from_str(&content)
            .map_err(|e| SyncError::Config(format!("invalid config {}: {e}", path.display())))?;

        if config.csv_path.as_os_str().is_empty() {
            return Err(SyncError::Config("'csv_path' is required".to_string()));
        }
        if config.books_path.as_os_str().is_empty() {
            return Err(SyncError::Config("'books_path' is required".to_string()));
        }
        Ok(config)
    }
}

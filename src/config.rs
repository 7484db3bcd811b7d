//! Category-mapping override files.
//!
//! Callers can replace individual default mappings via a JSON file of the
//! form `{ "ext": "Category" }`:
//!
//! ```json
//! {
//!     ".md": "Notes",
//!     "log": "Logs"
//! }
//! ```
//!
//! Keys are normalized to lowercase with a leading dot, so `"md"`, `".md"`
//! and `".MD"` all address the same entry. An override replaces the whole
//! entry; defaults not mentioned in the file are kept as-is.

use crate::category::CategoryMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading an override file.
#[derive(Debug)]
pub enum ConfigError {
    /// Override file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// The file exists but is not a JSON object of strings.
    ConfigInvalid { path: PathBuf, reason: String },
    /// IO error while reading the file.
    IoError { path: PathBuf, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Mapping file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid { path, reason } => {
                write!(f, "Invalid mapping file {}: {}", path.display(), reason)
            }
            ConfigError::IoError { path, reason } => {
                write!(f, "IO error reading {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Caller-supplied mapping overrides, parsed from JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MappingOverrides {
    entries: HashMap<String, String>,
}

impl MappingOverrides {
    /// Loads overrides from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist,
    /// `ConfigError::ConfigInvalid` if it is not a string-to-string JSON
    /// object, and `ConfigError::IoError` if it cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Applies these overrides to a category map. Key normalization
    /// (lowercasing, leading dot) happens inside the map itself.
    pub fn apply_to(&self, mapping: &mut CategoryMap) {
        mapping.apply_overrides(&self.entries);
    }

    /// Number of override entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the file contained no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

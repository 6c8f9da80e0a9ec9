//! Application Configuration
//!
//! Loaded from an optional JSON file; every field has a default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult, ListType};
use crate::service::DEFAULT_LIST_TITLE;

const APP_DIR: &str = "koto";
const DB_FILE: &str = "koto.checklist.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding lists and items
    pub db_path: PathBuf,
    /// Directory for rolling log files
    pub log_dir: PathBuf,
    /// Title of the list `App::default_list` ensures
    pub default_list_title: String,
    pub default_list_type: ListType,
    /// Run `check_and_reset_lists` when the app opens
    pub reset_on_open: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let app_dir = data_dir();
        Self {
            db_path: app_dir.join(DB_FILE),
            log_dir: app_dir.join("logs"),
            default_list_title: DEFAULT_LIST_TITLE.to_string(),
            default_list_type: ListType::Custom,
            reset_on_open: true,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> DomainResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(DomainError::Internal(format!("Failed to read {}: {}", path.display(), e)))
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| DomainError::InvalidInput(format!("Bad config {}: {}", path.display(), e)))
    }

    /// Config rooted at `dir`, for tests and embedding
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE),
            log_dir: dir.join("logs"),
            ..Self::default()
        }
    }
}

/// Platform data directory for the app, or the working directory when the
/// platform has none
fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

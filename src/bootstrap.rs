//! Application bootstrap
//!
//! Wires config, logging, the store and the service together.

use std::path::Path;

use crate::config::AppConfig;
use crate::domain::{DomainError, DomainResult, List};
use crate::repository::{init_db, DbState};
use crate::service::ChecklistService;

/// Application handle shared with the presentation layer
pub struct App {
    config: AppConfig,
    db_state: DbState,
    service: ChecklistService,
}

impl App {
    /// Open the store described by `config`. Runs the auto-reset check
    /// when `reset_on_open` is set.
    pub fn open(config: AppConfig) -> DomainResult<Self> {
        if let Err(e) = rolling_logger::init_logger(&config.log_dir, "Koto") {
            eprintln!("Failed to init logger in {}: {}", config.log_dir.display(), e);
        }

        let db_state = init_db(&config.db_path).map_err(|e| {
            let _ = rolling_logger::error(&format!("DB init failed: {}", e));
            e
        })?;
        let service = ChecklistService::new(&db_state);
        let _ = rolling_logger::info("DB init success");

        if config.reset_on_open {
            let reset = service.check_and_reset_lists()?;
            log::info!("Startup reset check done, {} lists reset", reset);
        }

        Ok(Self {
            config,
            db_state,
            service,
        })
    }

    /// Open with the config file at `path` (defaults if it does not exist)
    pub fn open_with_config_file(path: &Path) -> DomainResult<Self> {
        Self::open(AppConfig::load(path)?)
    }

    pub fn service(&self) -> &ChecklistService {
        &self.service
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn db_path(&self) -> &Path {
        self.db_state.path()
    }

    /// Latest log lines for an in-app log viewer, oldest first
    pub fn recent_log_lines(&self) -> Vec<String> {
        rolling_logger::recent_lines()
    }

    /// The configured default list, created on first use
    pub fn default_list(&self) -> DomainResult<List> {
        self.service
            .ensure_default_list(&self.config.default_list_title, self.config.default_list_type)
            .map_err(|e| match e {
                DomainError::InvalidInput(msg) => {
                    DomainError::InvalidInput(format!("default_list_title: {}", msg))
                }
                other => other,
            })
    }
}

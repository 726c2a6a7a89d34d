//! Runtime configuration for tracker entry points.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//!
//! # Invariants
//! - Missing variables fall back to defaults; present but blank ones do too.
//! - `log_dir`, when set, is absolute.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PARCEL_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "PARCEL_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PARCEL_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "tracker.db";

/// Settings consumed by the CLI and other embedders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// SQLite file holding the `parcel` table.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl TrackerConfig {
    /// Reads `PARCEL_DB_PATH`, `PARCEL_LOG_LEVEL` and `PARCEL_LOG_DIR`.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    ///
    /// # Errors
    /// - Returns an error when the log directory is relative.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            let dir = PathBuf::from(dir);
            if !dir.is_absolute() {
                return Err(format!(
                    "{LOG_DIR_ENV} must be an absolute path, got `{}`",
                    dir.display()
                ));
            }
            config.log_dir = Some(dir);
        }

        Ok(config)
    }
}

//! Runtime configuration for the reservation data store.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//! - Keep resolution pure and testable through an injectable lookup.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never touches the file system.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "TABLEBOOK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TABLEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TABLEBOOK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "tablebook.sqlite3";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Log directory must be absolute for the rolling file logger.
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeLogDir(path) => write!(
                f,
                "{ENV_LOG_DIR} must be an absolute path, got `{}`",
                path.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(db_path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(log_dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(log_dir));
        }
        config.check()?;
        Ok(config)
    }

    /// Overrides the database path.
    pub fn with_db_path(mut self, path: impl AsRef<Path>) -> Self {
        self.db_path = path.as_ref().to_path_buf();
        self
    }

    /// Overrides the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Overrides the log directory.
    pub fn with_log_dir(mut self, dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        self.log_dir = Some(dir.as_ref().to_path_buf());
        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<(), ConfigError> {
        match &self.log_dir {
            Some(dir) if !dir.is_absolute() => Err(ConfigError::RelativeLogDir(dir.clone())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert!(config.db_path.ends_with(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn environment_values_override_defaults_and_blanks_are_ignored() {
        let log_dir = std::env::temp_dir().join("tablebook-logs");
        let log_dir_text = log_dir.to_string_lossy().to_string();
        let config = StoreConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, " /var/lib/tablebook/app.db "),
            (ENV_LOG_LEVEL, "   "),
            (ENV_LOG_DIR, log_dir_text.as_str()),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/tablebook/app.db"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, Some(log_dir));
    }

    #[test]
    fn relative_log_dir_is_rejected() {
        let err = StoreConfig::from_lookup(lookup_from(&[(ENV_LOG_DIR, "logs")])).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir(PathBuf::from("logs")));
        assert!(StoreConfig::default().with_log_dir("logs").is_err());
    }
}

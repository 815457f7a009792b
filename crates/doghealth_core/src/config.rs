//! Runtime configuration loaded from environment variables.
//!
//! Hosts may load a `.env` file first (the CLI does, via `dotenvy`).

use crate::logging::{LogLevel, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "DOGHEALTH_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "DOGHEALTH_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "DOGHEALTH_LOG_DIR";
pub const DEFAULT_DB_PATH: &str = "doghealth.sqlite3";

/// Core runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// File logging is disabled when absent.
    pub log_dir: Option<PathBuf>,
}

/// Invalid configuration value.
#[derive(Debug)]
pub enum ConfigError {
    InvalidLogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(err) => write!(f, "{LOG_LEVEL_VAR}: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(err) => Some(err),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: LogLevel::build_default(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error when `DOGHEALTH_LOG_LEVEL` is set to an unknown level.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(value) => value.parse().map_err(ConfigError::InvalidLogLevel)?,
            None => defaults.log_level,
        };

        Ok(Self {
            db_path: read(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level,
            log_dir: read(LOG_DIR_VAR).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_DB_PATH};
    use crate::logging::LogLevel;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).expect("empty environment should load");
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.log_level, LogLevel::build_default());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn variables_override_defaults_and_blanks_are_unset() {
        let config = CoreConfig::from_lookup(lookup(&[
            ("DOGHEALTH_DB_PATH", "/var/lib/doghealth/db.sqlite3"),
            ("DOGHEALTH_LOG_LEVEL", "WARN"),
            ("DOGHEALTH_LOG_DIR", "   "),
        ]))
        .expect("valid variables should load");
        assert_eq!(config.db_path, PathBuf::from("/var/lib/doghealth/db.sqlite3"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = CoreConfig::from_lookup(lookup(&[("DOGHEALTH_LOG_LEVEL", "loud")]))
            .expect_err("unknown level should be rejected");
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}

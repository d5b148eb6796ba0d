//! Environment-driven configuration.

use crate::logging::{DEFAULT_LOG_LEVEL, normalize_log_level};
use camino::Utf8PathBuf;
use std::env::{self, VarError};
use thiserror::Error;

/// `PostgreSQL` connection URL.
pub const DATABASE_URL_ENV: &str = "CONTENTBOARD_DATABASE_URL";
/// Maximum pooled connections.
pub const POOL_SIZE_ENV: &str = "CONTENTBOARD_POOL_SIZE";
/// Log level name.
pub const LOG_LEVEL_ENV: &str = "CONTENTBOARD_LOG_LEVEL";
/// Directory holding the preferences file.
pub const PREFERENCES_DIR_ENV: &str = "CONTENTBOARD_PREFERENCES_DIR";

const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_PREFERENCES_DIR: &str = ".contentboard";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset.
    #[error("{0} must be set")]
    Missing(&'static str),
    /// A variable holds non-UTF-8 data.
    #[error("{0} is not valid UTF-8")]
    NotUnicode(&'static str),
    /// The pool size is not a positive integer.
    #[error("invalid pool size {0:?}; expected a positive integer")]
    InvalidPoolSize(String),
    /// The log level is not recognised.
    #[error("invalid log level {0:?}; expected trace, debug, info, warn, or error")]
    InvalidLogLevel(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Runtime configuration for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// `PostgreSQL` connection URL, when persistence is remote.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// Normalized log level directive.
    pub log_level: &'static str,
    /// Directory holding the preferences file.
    pub preferences_dir: Utf8PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            log_level: DEFAULT_LOG_LEVEL,
            preferences_dir: Utf8PathBuf::from(DEFAULT_PREFERENCES_DIR),
        }
    }
}

impl BoardConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(err) => Err(err),
        })
    }

    /// Reads configuration through `lookup`, which resolves one variable
    /// the way [`env::var`] does.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is malformed.
    pub fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<Option<String>, VarError>,
    ) -> ConfigResult<Self> {
        let read = |key: &'static str| {
            lookup(key)
                .map_err(|_| ConfigError::NotUnicode(key))
                .map(|value| value.filter(|raw| !raw.trim().is_empty()))
        };
        let defaults = Self::default();

        let pool_size = match read(POOL_SIZE_ENV)? {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidPoolSize(raw))?,
            None => defaults.pool_size,
        };
        let log_level = match read(LOG_LEVEL_ENV)? {
            Some(raw) => normalize_log_level(&raw).ok_or(ConfigError::InvalidLogLevel(raw))?,
            None => defaults.log_level,
        };

        Ok(Self {
            database_url: read(DATABASE_URL_ENV)?,
            pool_size,
            log_level,
            preferences_dir: read(PREFERENCES_DIR_ENV)?
                .map_or(defaults.preferences_dir, Utf8PathBuf::from),
        })
    }

    /// Returns the database URL or an error naming the missing variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when no URL is configured.
    pub fn require_database_url(&self) -> ConfigResult<&str> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))
    }
}

//! Configuration errors and semantic validation.

use std::path::PathBuf;
use thiserror::Error;

use crate::settings::Settings;

/// Largest page size accepted from config or flags.
pub const MAX_PAGE_SIZE: usize = 500;

/// Configuration result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::NotFound { .. } => 10,
            ConfigError::Io { .. } => 12,
            ConfigError::Parse { .. } => 13,
            ConfigError::InvalidValue { .. } => 11,
        }
    }
}

/// Validate loaded settings semantically.
pub fn validate_settings(settings: &Settings) -> ConfigResult<()> {
    if settings.page_size == 0 || settings.page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidValue {
            key: "page_size".to_string(),
            message: format!("must be in 1..={}, got {}", MAX_PAGE_SIZE, settings.page_size),
        });
    }

    if settings.source.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "source".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    Ok(())
}

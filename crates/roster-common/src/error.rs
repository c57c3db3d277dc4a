//! Error types for roster.
//!
//! Every error carries a stable numeric code and a category so the binary
//! can map it to an exit code and the TUI can show a short headline.
//!
//! Engine operations (store, view, selection, edit) never fail; not-found
//! mutations and out-of-range navigation are silent no-ops. The variants here
//! cover the ambient layers: configuration, the record source, I/O and the
//! terminal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for roster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file and flag errors.
    Config,
    /// Record source (fetch/parse) errors.
    Source,
    /// File I/O and serialization errors.
    Io,
    /// Terminal setup and rendering errors.
    Ui,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Source => write!(f, "source"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Ui => write!(f, "ui"),
        }
    }
}

/// Unified error type for roster.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    // Source errors (20-29)
    #[error("failed to fetch records: {0}")]
    Fetch(String),

    #[error("malformed record feed: {0}")]
    MalformedFeed(String),

    // I/O errors (30-39)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Terminal errors (40-49)
    #[error("terminal error: {0}")]
    Terminal(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Source errors
    /// - 30-39: I/O errors
    /// - 40-49: Terminal errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidSetting { .. } => 11,
            Error::Fetch(_) => 20,
            Error::MalformedFeed(_) => 21,
            Error::Io(_) => 30,
            Error::Json(_) => 31,
            Error::Terminal(_) => 40,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidSetting { .. } => ErrorCategory::Config,
            Error::Fetch(_) | Error::MalformedFeed(_) => ErrorCategory::Source,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
            Error::Terminal(_) => ErrorCategory::Ui,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidSetting { .. } => "Invalid Setting",
            Error::Fetch(_) => "Fetch Failed",
            Error::MalformedFeed(_) => "Malformed Record Feed",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Error",
            Error::Terminal(_) => "Terminal Error",
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::InvalidSetting { .. } => {
                "Check roster.toml syntax, or pass --config to point at another file."
            }
            Error::Fetch(_) => {
                "Check the --source URL or path. The feed is fetched once; restart to retry."
            }
            Error::MalformedFeed(_) => {
                "The source must be a JSON array of objects with at least an \"id\" key."
            }
            Error::Io(_) => "Check that the file exists and is readable.",
            Error::Json(_) => "Invalid JSON. Check syntax with 'jq .' or restore from backup.",
            Error::Terminal(_) => {
                "Run inside an interactive terminal, or use 'roster show' for headless output."
            }
        }
    }

    /// Format the error for a human reader: headline, reason, fix.
    pub fn format_human(&self) -> String {
        format!(
            "✗ {}\n  Reason: {}\n  Fix: {}",
            self.headline(),
            self,
            self.remediation()
        )
    }
}

//! Record sources.
//!
//! The collection is fetched exactly once at startup. A source is either an
//! HTTP(S) URL serving a JSON array or a local JSON file with the same shape.
//! There is no retry; a failed fetch leaves the session empty.

use roster_common::Record;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Fixed HTTP timeout for the single fetch.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from fetching or decoding the record feed.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} is not a JSON array of records: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl From<SourceError> for roster_common::Error {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Parse { .. } => roster_common::Error::MalformedFeed(err.to_string()),
            other => roster_common::Error::Fetch(other.to_string()),
        }
    }
}

/// Provider of the initial record collection.
pub trait RecordSource: Send {
    /// Fetch and decode every record.
    fn fetch(&self) -> Result<Vec<Record>, SourceError>;

    /// Human-readable origin, for logs and the status bar.
    fn describe(&self) -> String;
}

/// Decode a feed body.
pub fn parse_records(body: &str, origin: &str) -> Result<Vec<Record>, SourceError> {
    serde_json::from_str(body).map_err(|source| SourceError::Parse {
        origin: origin.to_string(),
        source,
    })
}

/// Feed served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl RecordSource for HttpSource {
    fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        let http_err = |source| SourceError::Http {
            url: self.url.clone(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(http_err)?;

        tracing::debug!(target: "roster.source", url = %self.url, "fetching records");
        let response = client.get(&self.url).send().map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(http_err)?;
        let records = parse_records(&body, &self.url)?;
        tracing::info!(
            target: "roster.source",
            url = %self.url,
            count = records.len(),
            "records fetched"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Feed stored in a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSource for FileSource {
    fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let records = parse_records(&body, &self.path.display().to_string())?;
        tracing::info!(
            target: "roster.source",
            path = %self.path.display(),
            count = records.len(),
            "records read"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a source by location: URLs go over HTTP, anything else is a file.
pub fn source_from_location(location: &str) -> Box<dyn RecordSource> {
    let trimmed = location.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Box::new(HttpSource::new(trimmed))
    } else {
        Box::new(FileSource::new(trimmed))
    }
}

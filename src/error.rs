use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures talking to the Discord API.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Non-2xx, non-429 response.
    #[error("request to {endpoint} failed with status {status}")]
    RemoteFetch { endpoint: String, status: StatusCode },
    #[error("access token contains characters not allowed in an HTTP header")]
    InvalidToken,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures writing the output files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize JSON to {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write CSV to {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

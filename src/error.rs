// src/error.rs
use thiserror::Error;

/// Failures surfaced by the newsroom API client and the adapters built on it.
/// Adapters never retry; callers decide whether to fall back to cached data.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed: {status} {text}")]
    Status { status: u16, text: String },

    #[error("API request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is not a content feed")]
    NotContentFeed(&'static str),

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

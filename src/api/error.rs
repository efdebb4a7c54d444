//! Fetch error types
//!
//! Every way a page request can fail. The widget never lets these escape:
//! they are turned into an error status on the fetch state and a message
//! for the presentational layer.

use thiserror::Error;

/// Errors produced while fetching a page of results
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status code
    #[error("API responded with status {0}")]
    Status(u16),

    /// The response body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;

//! Fetch Errors
//!
//! Failure reasons a remote fetch can report back to a slot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a fetch cycle failed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not authorized")]
    Unauthorized,
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Map a non-success HTTP status to an error
    pub fn from_status(status: u16, what: &str) -> Self {
        match status {
            401 | 403 => FetchError::Unauthorized,
            404 => FetchError::NotFound(what.to_string()),
            other => FetchError::Status(other),
        }
    }

    /// Whether retrying the same request could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status(code) => *code >= 500 || *code == 429,
            FetchError::NotFound(_) | FetchError::Unauthorized | FetchError::Decode(_) => false,
        }
    }
}

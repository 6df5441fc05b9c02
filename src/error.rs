// Error types for folio.
// Covers GitHub API failures, cache corruption, and fetch cancellation.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("rate limited by the GitHub API")]
    RateLimited,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {0}")]
    Http(reqwest::StatusCode),

    #[error("malformed cache entry")]
    MalformedCache,

    #[error("unexpected payload shape: {0}")]
    Validation(#[from] serde_json::Error),

    #[error("fetch cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FolioError {
    /// Whether the recovery loop should give up immediately instead of
    /// retrying the full load sequence.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FolioError::NotFound(_) | FolioError::Cancelled)
    }

    /// Fixed user-facing message for a surfaced error.
    pub fn user_message(&self) -> &'static str {
        match self {
            FolioError::Network(_) => {
                "Could not reach GitHub. Check your connection and try again."
            }
            FolioError::Timeout(_) => "The connection is too slow. Try again shortly.",
            FolioError::RateLimited => "GitHub request limit reached. Wait a moment and try again.",
            FolioError::NotFound(_) => "That user could not be found on GitHub.",
            FolioError::Cancelled => "Loading was cancelled.",
            FolioError::Http(_)
            | FolioError::MalformedCache
            | FolioError::Validation(_)
            | FolioError::Io(_) => "Failed to load data from GitHub.",
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

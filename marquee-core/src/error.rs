//! Errors surfaced by the typed provider lookups.

use thiserror::Error;

/// Why a provider call produced no answer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request could not be sent or its body could not be read.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
}

/// Result alias for provider calls.
pub type Result<T> = std::result::Result<T, ProviderError>;

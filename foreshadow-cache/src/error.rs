//! Error types for skeleton fetching.

use thiserror::Error;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Errors that can occur while fetching a skeleton.
///
/// A fetch error is terminal for its URL: the cache entry becomes
/// confirmed-absent and dependent requests proceed without a skeleton.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("skeleton fetch returned status {status}")]
    Status { status: u16 },

    /// The skeleton URL could not be resolved against the base.
    #[error("invalid skeleton url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

//! Error types for the coordination layer.

use crate::host::HostError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while coordinating skeleton application.
///
/// None of these ever reach the host framework's request path; the
/// coordinator logs them and degrades to the unskeletoned base behavior.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configured document URL is not a valid absolute URL.
    #[error("invalid document url: {0}")]
    InvalidDocumentUrl(#[from] url::ParseError),

    /// The host failed to carry out a swap (missing re-insertion point).
    #[error(transparent)]
    Host(#[from] HostError),
}

//! Application error types

use stubprobe_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Setup failures while creating a fixture resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FixtureError {
    /// The creation request could not be built.
    #[error("fixture request invalid: {0}")]
    Request(#[from] DomainError),

    /// The creation request never got a response.
    #[error("fixture request failed: {0}")]
    Transport(#[from] HttpClientError),

    /// The creation request returned a status outside the accepted set.
    #[error("fixture returned status {status}, expected {expected}")]
    UnexpectedStatus {
        /// Status received.
        status: u16,
        /// Accepted set, described.
        expected: String,
    },

    /// The creation response was not JSON.
    #[error("fixture response is not JSON: {0}")]
    InvalidBody(String),
}

/// Errors that abort a whole run.
///
/// Per-case problems never surface here; they become errored case results.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The selection matched no cases.
    #[error("no cases selected")]
    NothingSelected,
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building or validating test cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A required header name is invalid.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// A required header value is invalid.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(String),

    /// A path template has unbalanced or empty placeholders.
    #[error("invalid path template: {0}")]
    InvalidPathTemplate(String),

    /// A path template placeholder has no bound value.
    #[error("missing path parameter `{name}` for template {template}")]
    MissingPathParam {
        /// Placeholder name.
        name: String,
        /// The template being rendered.
        template: String,
    },

    /// An expected status set was declared without any codes.
    #[error("expected status set must not be empty")]
    EmptyStatusSet,

    /// An identifier is invalid or empty.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

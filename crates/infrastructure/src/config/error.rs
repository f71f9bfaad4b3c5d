//! Configuration errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`super::SuiteConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The config file is not valid YAML for the expected keys.
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_yaml::Error,
    },

    /// The base URL is unusable.
    #[error("invalid base URL `{value}`: {reason}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A numeric setting did not parse.
    #[error("invalid value for {name}: `{value}` is not a non-negative integer")]
    InvalidNumber {
        /// Setting name (environment variable or key).
        name: String,
        /// Offending value.
        value: String,
    },
}

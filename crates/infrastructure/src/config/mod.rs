//! Suite configuration.
//!
//! Values are layered, lowest precedence first:
//! built-in defaults, an optional YAML file, `STUBPROBE_*` environment
//! variables, then explicit overrides from the command line.
//! The result is read-only for the rest of the run.

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::{ConfigFile, ConfigLoader, ConfigOverrides, ENV_PREFIX};

use std::time::Duration;

use stubprobe_application::Credentials;
use url::Url;

/// Default stub address (Prism's default port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:4010";

/// Default bearer token accepted by schema-driven stubs.
pub const DEFAULT_BEARER_TOKEN: &str = "valid.jwt.token.here";

/// Default basic auth user.
pub const DEFAULT_BASIC_USERNAME: &str = "user";

/// Default basic auth password.
pub const DEFAULT_BASIC_PASSWORD: &str = "pass";

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Stub base URL; case paths are appended to it.
    pub base_url: Url,
    /// Token for bearer-authenticated cases.
    pub bearer_token: String,
    /// Basic auth user for `/auth/token`.
    pub basic_username: String,
    /// Basic auth password for `/auth/token`.
    pub basic_password: String,
    /// Per-request timeout; `None` keeps the client default.
    pub timeout_ms: Option<u64>,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl SuiteConfig {
    /// Credentials handed to the catalog.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            bearer_token: self.bearer_token.clone(),
            basic_username: self.basic_username.clone(),
            basic_password: self.basic_password.clone(),
        }
    }

    /// Timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Parses and checks a base URL.
///
/// # Errors
/// Returns [`ConfigError::InvalidBaseUrl`] unless the value is an absolute
/// `http` or `https` URL.
pub fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason,
    };
    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("https://stub.internal/api").is_ok());
        assert!(matches!(
            parse_base_url("ftp://stub"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(parse_base_url("localhost:4010/pets?x=1").is_err());
        assert!(parse_base_url("not a url").is_err());
    }
}

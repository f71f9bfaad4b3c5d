//! HTTP client port

use std::future::Future;
use std::pin::Pin;

use stubprobe_domain::{AuthConfig, DomainResult, Headers, HttpMethod, RequestBody, RequestSpec, ResponseSpec};
use thiserror::Error;
use url::Url;

/// Errors raised before a response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed or used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Nothing listens on the target port.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The host name did not resolve.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Target host.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// Any other connection-level failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Configured timeout.
        timeout_ms: u64,
    },

    /// The redirect chain was longer than allowed.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Anything else reported by the transport.
    #[error("{0}")]
    Other(String),
}

/// A request with its URL fully resolved, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: Url,
    /// Explicit headers, applied first.
    pub headers: Headers,
    /// Credentials, applied after explicit headers.
    pub auth: AuthConfig,
    /// Body, applied last.
    pub body: RequestBody,
}

impl OutgoingRequest {
    /// Resolves a request against a base URL.
    ///
    /// # Errors
    /// Returns a domain error when a path parameter is unbound, a header is
    /// malformed or the joined URL does not parse.
    pub fn prepare(spec: &RequestSpec, base: &Url) -> DomainResult<Self> {
        spec.headers.validate()?;
        Ok(Self {
            method: spec.method,
            url: spec.url(base)?,
            headers: spec.headers.clone(),
            auth: spec.auth.clone(),
            body: spec.body.clone(),
        })
    }

    /// Content type the transport must add, if the caller did not set one.
    #[must_use]
    pub fn implied_content_type(&self) -> Option<&'static str> {
        if self.headers.contains("content-type") {
            None
        } else {
            self.body.content_type()
        }
    }
}

/// Port for sending HTTP requests.
pub trait HttpClient: Send + Sync {
    /// Sends one request and returns the full response.
    ///
    /// Non-2xx statuses are responses, not errors.
    fn execute(
        &self,
        request: &OutgoingRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>>;
}

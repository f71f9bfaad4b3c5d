//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder};
use stubprobe_application::ports::{HttpClient, HttpClientError, OutgoingRequest};
use stubprobe_domain::{AuthConfig, HttpMethod, ResponseSpec};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("stubprobe/", env!("CARGO_PKG_VERSION"));

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
    timeout_ms: Option<u64>,
}

impl ReqwestHttpClient {
    /// Creates a client.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - Timeout: reqwest's default unless `timeout` is set
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, HttpClientError> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self {
            client,
            timeout_ms: timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Applies credentials on top of the explicit headers.
    fn apply_auth(builder: RequestBuilder, auth: &AuthConfig) -> RequestBuilder {
        match auth {
            AuthConfig::None => builder,
            AuthConfig::Bearer { token } => builder.bearer_auth(token),
            AuthConfig::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: Option<u64>) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout {
                timeout_ms: timeout_ms.unwrap_or_default(),
            };
        }

        let host = || {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error_chain(error));
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with its sources; reqwest hides the root cause otherwise.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(
        &self,
        request: &OutgoingRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ResponseSpec, HttpClientError>> + Send + '_>> {
        // Built eagerly so the future does not borrow `request`.
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone());

        for header in request.headers.iter() {
            builder = builder.header(&header.name, &header.value);
        }

        builder = Self::apply_auth(builder, &request.auth);

        if let Some(content_type) = request.implied_content_type() {
            builder = builder.header("Content-Type", content_type);
        }
        if let Some(body) = request.body.to_wire() {
            builder = builder.body(body);
        }

        let timeout_ms = self.timeout_ms;

        Box::pin(async move {
            let start = Instant::now();

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout_ms))?;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            let headers: Vec<(String, String)> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?;

            Ok(ResponseSpec::new(status, headers, &body, duration))
        })
    }
}

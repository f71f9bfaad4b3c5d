//! Request specification

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{Header, Headers, HttpMethod, PathTemplate, QueryParam, QueryParams, RequestBody};
use crate::auth::AuthConfig;
use crate::error::DomainResult;

/// Everything needed to issue one HTTP request against the stub, relative to
/// a base URL supplied at run time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template relative to the base URL.
    pub path: PathTemplate,
    /// Values for the template placeholders.
    #[serde(default)]
    pub path_params: BTreeMap<String, String>,
    /// Query string parameters.
    #[serde(default)]
    pub query: QueryParams,
    /// Explicit headers.
    #[serde(default)]
    pub headers: Headers,
    /// Credentials applied after the explicit headers.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Request payload.
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request with no parameters, headers, auth or body.
    ///
    /// # Errors
    /// Returns an error if `path` is not a valid template.
    pub fn new(method: HttpMethod, path: &str) -> DomainResult<Self> {
        Ok(Self {
            method,
            path: PathTemplate::parse(path)?,
            path_params: BTreeMap::new(),
            query: QueryParams::new(),
            headers: Headers::new(),
            auth: AuthConfig::None,
            body: RequestBody::None,
        })
    }

    /// Shorthand for a GET request.
    ///
    /// # Errors
    /// Returns an error if `path` is not a valid template.
    pub fn get(path: &str) -> DomainResult<Self> {
        Self::new(HttpMethod::Get, path)
    }

    /// Shorthand for a POST request.
    ///
    /// # Errors
    /// Returns an error if `path` is not a valid template.
    pub fn post(path: &str) -> DomainResult<Self> {
        Self::new(HttpMethod::Post, path)
    }

    /// Shorthand for a PUT request.
    ///
    /// # Errors
    /// Returns an error if `path` is not a valid template.
    pub fn put(path: &str) -> DomainResult<Self> {
        Self::new(HttpMethod::Put, path)
    }

    /// Shorthand for a DELETE request.
    ///
    /// # Errors
    /// Returns an error if `path` is not a valid template.
    pub fn delete(path: &str) -> DomainResult<Self> {
        Self::new(HttpMethod::Delete, path)
    }

    /// Binds a path placeholder.
    #[must_use]
    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.bind_path_param(name, value);
        self
    }

    /// Binds a path placeholder in place, replacing any earlier value.
    pub fn bind_path_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.path_params.insert(name.into(), value.into());
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Appends the same key once per value.
    #[must_use]
    pub fn with_query_repeated<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.query.add_repeated(key, values);
        self
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Sets a JSON payload.
    #[must_use]
    pub fn with_json(mut self, value: Value) -> Self {
        self.body = RequestBody::json(value);
        self
    }

    /// Renders the path and returns `<path>[?query]` for display.
    ///
    /// # Errors
    /// Returns an error if a placeholder is unbound.
    pub fn display_target(&self) -> DomainResult<String> {
        let path = self.path.render(&self.path_params)?;
        if self.query.is_empty() {
            return Ok(path);
        }
        let query: Vec<String> = self
            .query
            .iter()
            .map(|p| format!("{}={}", p.key, p.value))
            .collect();
        Ok(format!("{path}?{}", query.join("&")))
    }

    /// Builds the absolute URL against `base`.
    ///
    /// The rendered path is appended to the base path, so a base such as
    /// `http://host/api` keeps its `/api` prefix.
    ///
    /// # Errors
    /// Returns an error if a placeholder is unbound or `base` cannot carry a
    /// path.
    pub fn url(&self, base: &Url) -> DomainResult<Url> {
        let mut url = base.clone();
        self.path.append_to(&mut url, &self.path_params)?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in self.query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("http://localhost:4010").unwrap()
    }

    #[test]
    fn test_url_with_repeated_query() {
        let request = RequestSpec::get("/pets")
            .unwrap()
            .with_query_repeated("tags", ["dog"])
            .with_query("limit", "5");
        assert_eq!(
            request.url(&base()).unwrap().as_str(),
            "http://localhost:4010/pets?tags=dog&limit=5"
        );
    }

    #[test]
    fn test_url_keeps_base_prefix() {
        let base = Url::parse("http://stub.internal:8080/api/").unwrap();
        let request = RequestSpec::get("/users/{id}")
            .unwrap()
            .with_path_param("id", "abc");
        assert_eq!(
            request.url(&base).unwrap().as_str(),
            "http://stub.internal:8080/api/users/abc"
        );
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let request = RequestSpec::get("/auth/token").unwrap();
        assert_eq!(
            request.url(&base()).unwrap().as_str(),
            "http://localhost:4010/auth/token"
        );
    }

    #[test]
    fn test_url_reports_unbound_placeholder() {
        let request = RequestSpec::delete("/pets/{id}").unwrap();
        assert!(matches!(
            request.url(&base()),
            Err(DomainError::MissingPathParam { .. })
        ));
    }

    #[test]
    fn test_url_encodes_bound_values() {
        let request = RequestSpec::get("/things/{id}")
            .unwrap()
            .with_path_param("id", r"..\..\admin");
        assert_eq!(
            request.url(&base()).unwrap().as_str(),
            "http://localhost:4010/things/..%5C..%5Cadmin"
        );
    }

    #[test]
    fn test_url_rejects_base_without_path() {
        let base = Url::parse("mailto:stub@example.com").unwrap();
        let request = RequestSpec::get("/pets").unwrap();
        assert!(matches!(request.url(&base), Err(DomainError::InvalidUrl(_))));
    }

    #[test]
    fn test_display_target() {
        let request = RequestSpec::get("/things")
            .unwrap()
            .with_query("sort", "name")
            .with_query("order", "wrong");
        assert_eq!(request.display_target().unwrap(), "/things?sort=name&order=wrong");
    }

    #[test]
    fn test_builder_sets_body_and_auth() {
        let request = RequestSpec::post("/users")
            .unwrap()
            .with_auth(AuthConfig::bearer("t"))
            .with_json(json!({"email_address": "a@example.com"}));
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.auth, AuthConfig::bearer("t"));
        assert!(!request.body.is_none());
    }
}

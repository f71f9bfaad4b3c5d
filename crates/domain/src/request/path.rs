//! Path templates with `{name}` placeholders.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Base used only to run segments through the URL encoder when rendering a
/// path on its own.
const RENDER_BASE: &str = "http://render.invalid/";

/// A request path such as `/pets/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTemplate(String);

impl PathTemplate {
    /// Creates a template, checking that placeholders are balanced and named.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidPathTemplate`] for `{`/`}` mismatches or
    /// empty placeholders.
    pub fn parse(template: impl Into<String>) -> DomainResult<Self> {
        let template = template.into();
        validate(&template)?;
        Ok(Self(template))
    }

    /// Returns the raw template.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends the rendered segments to the path of `url`.
    ///
    /// Each segment goes through [`Url::path_segments_mut`], so a bound value
    /// stays inside its segment: `/`, `\`, `?`, `#` and `%` are
    /// percent-encoded while malformed identifiers such as `abc` reach the
    /// server unchanged.
    ///
    /// # Errors
    /// Returns [`DomainError::MissingPathParam`] when a placeholder is unbound
    /// and [`DomainError::InvalidUrl`] when `url` cannot carry a path.
    pub fn append_to(&self, url: &mut Url, params: &BTreeMap<String, String>) -> DomainResult<()> {
        let segments = self.segments(params)?;
        url.path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl("URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(())
    }

    /// Renders the encoded path alone, as it appears on the wire.
    ///
    /// # Errors
    /// Returns [`DomainError::MissingPathParam`] when a placeholder is unbound.
    pub fn render(&self, params: &BTreeMap<String, String>) -> DomainResult<String> {
        let mut url = Url::parse(RENDER_BASE).map_err(|e| DomainError::InvalidUrl(e.to_string()))?;
        self.append_to(&mut url, params)?;
        Ok(url.path().to_string())
    }

    /// Splits the template on `/` and substitutes placeholders verbatim.
    fn segments(&self, params: &BTreeMap<String, String>) -> DomainResult<Vec<String>> {
        self.0
            .trim_start_matches('/')
            .split('/')
            .map(|segment| self.substitute(segment, params))
            .collect()
    }

    fn substitute(&self, segment: &str, params: &BTreeMap<String, String>) -> DomainResult<String> {
        let mut out = String::with_capacity(segment.len());
        let mut rest = segment;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| DomainError::InvalidPathTemplate(self.0.clone()))?;
            let name = &after[..end];
            let value = params.get(name).ok_or_else(|| DomainError::MissingPathParam {
                name: name.to_string(),
                template: self.0.clone(),
            })?;
            out.push_str(value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Placeholders must be non-empty, closed and confined to one segment.
fn validate(template: &str) -> DomainResult<()> {
    let invalid = || DomainError::InvalidPathTemplate(template.to_string());
    let mut rest = template;
    loop {
        match (rest.find('{'), rest.find('}')) {
            (None, None) => return Ok(()),
            (Some(o), Some(c)) if o < c => {
                let name = &rest[o + 1..c];
                if name.is_empty() || name.contains(['{', '/']) {
                    return Err(invalid());
                }
                rest = &rest[c + 1..];
            }
            _ => return Err(invalid()),
        }
    }
}

//! Request header types

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name (case-insensitive on the wire).
    pub name: String,
    /// Header value.
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Checks the header against RFC 7230 token and field-value rules.
    ///
    /// # Errors
    /// Returns an error when the name is empty or contains separators, or the
    /// value contains control characters.
    pub fn validate(&self) -> DomainResult<()> {
        let name_ok = !self.name.is_empty()
            && self
                .name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b));
        if !name_ok {
            return Err(DomainError::InvalidHeaderName(self.name.clone()));
        }
        if self.value.bytes().any(|b| b.is_ascii_control() && b != b'\t') {
            return Err(DomainError::InvalidHeaderValue(self.name.clone()));
        }
        Ok(())
    }
}

/// Ordered header list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a header.
    pub fn add(&mut self, header: Header) {
        self.items.push(header);
    }

    /// Returns true if a header with this name is present, compared
    /// case-insensitively.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Returns an iterator over all headers.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// Validates every header.
    ///
    /// # Errors
    /// Returns the first invalid header's error.
    pub fn validate(&self) -> DomainResult<()> {
        self.items.iter().try_for_each(Header::validate)
    }
}

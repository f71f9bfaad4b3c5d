//! HTTP Request body types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type sent with JSON payloads.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Request payload.
///
/// An empty JSON object is a real payload (`{}`), distinct from no body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document
    Json(Value),
}

impl RequestBody {
    /// Creates a JSON body.
    #[must_use]
    pub const fn json(value: Value) -> Self {
        Self::Json(value)
    }

    /// Returns whether no payload will be sent.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type if a payload is present.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }

    /// Serializes the payload for the wire.
    #[must_use]
    pub fn to_wire(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Json(value) => Some(value.to_string()),
        }
    }
}

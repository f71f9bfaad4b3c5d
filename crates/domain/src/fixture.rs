//! Fixture resources created before a dependent request.
//!
//! A fixture issues a creation request, requires a success status, and
//! pulls an identifier out of the response body. When the body carries no
//! identifier a literal fallback is used instead. That fallback hides stubs
//! that never return an id, so every extraction records whether it happened
//! and the runner reports it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::request::RequestSpec;
use crate::testing::StatusExpectation;

/// Identifier of a resource created by a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric identifier (`/pets/{id}`).
    Integer(i64),
    /// Textual identifier, usually a UUID.
    Text(String),
}

impl ResourceId {
    /// Reads an identifier from a JSON value.
    ///
    /// Only integers and strings count; anything else (`null`, floats,
    /// objects) is treated as absent.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Integer),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Result of pulling an id out of a fixture response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdExtraction {
    /// The identifier to use.
    pub id: ResourceId,
    /// True when the response had no usable id and the fallback was taken.
    pub used_fallback: bool,
}

/// Setup request that produces a resource for a dependent request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSpec {
    /// The creation request.
    pub request: RequestSpec,
    /// Statuses accepted from the creation request.
    pub accepted: StatusExpectation,
    /// Body field holding the new identifier.
    pub id_field: String,
    /// Identifier used when `id_field` is missing.
    pub fallback: ResourceId,
    /// Path placeholder of the dependent request that receives the id.
    pub bind_as: String,
}

impl FixtureSpec {
    /// Creates a fixture with the conventional settings: accepts 200 or 201,
    /// reads `id`, falls back to `1`, and binds to the `{id}` placeholder.
    #[must_use]
    pub fn create(request: RequestSpec) -> Self {
        Self {
            request,
            accepted: StatusExpectation::of([200, 201]),
            id_field: "id".to_string(),
            fallback: ResourceId::Integer(1),
            bind_as: "id".to_string(),
        }
    }

    /// Extracts the identifier from a parsed creation response.
    ///
    /// A non-object body or a missing/unusable field yields the fallback.
    /// Unlike a plain get-with-default, a present but `null`, float or
    /// structured `id` also takes the fallback, so every such response is
    /// reported through `used_fallback`.
    #[must_use]
    pub fn extract_id(&self, body: &Value) -> IdExtraction {
        match body.get(&self.id_field).and_then(ResourceId::from_json) {
            Some(id) => IdExtraction {
                id,
                used_fallback: false,
            },
            None => IdExtraction {
                id: self.fallback.clone(),
                used_fallback: true,
            },
        }
    }
}

/// What a fixture produced for one case run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureOutcome {
    /// Status returned by the creation request.
    pub status: u16,
    /// Identifier handed to the dependent request.
    pub id: ResourceId,
    /// True when the fallback identifier was used.
    pub used_fallback: bool,
}

impl FixtureOutcome {
    /// Builds an outcome from a status and an extraction.
    #[must_use]
    pub fn new(status: u16, extraction: IdExtraction) -> Self {
        Self {
            status,
            id: extraction.id,
            used_fallback: extraction.used_fallback,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixture() -> FixtureSpec {
        FixtureSpec::create(
            RequestSpec::post("/pets")
                .unwrap()
                .with_json(json!({"name": "Fluffy", "tag": "dog"})),
        )
    }

    #[test]
    fn test_extracts_integer_id() {
        let extraction = fixture().extract_id(&json!({"id": 42, "name": "Fluffy"}));
        assert_eq!(extraction.id, ResourceId::Integer(42));
        assert!(!extraction.used_fallback);
    }

    #[test]
    fn test_extracts_uuid_id() {
        let extraction =
            fixture().extract_id(&json!({"id": "0b7b5e86-2d3c-4c4f-9d59-0e1f4cf2f9f6"}));
        assert_eq!(
            extraction.id.to_string(),
            "0b7b5e86-2d3c-4c4f-9d59-0e1f4cf2f9f6"
        );
        assert!(!extraction.used_fallback);
    }

    #[test]
    fn test_missing_id_uses_fallback() {
        let extraction = fixture().extract_id(&json!({"name": "Fluffy"}));
        assert_eq!(extraction.id, ResourceId::Integer(1));
        assert!(extraction.used_fallback);
    }

    #[test]
    fn test_unusable_ids_use_fallback() {
        for body in [json!({"id": null}), json!({"id": 1.5}), json!({"id": {"value": 7}})] {
            let extraction = fixture().extract_id(&body);
            assert_eq!(extraction.id, ResourceId::Integer(1), "{body}");
            assert!(extraction.used_fallback, "{body}");
        }
    }

    #[test]
    fn test_array_body_uses_fallback() {
        let extraction = fixture().extract_id(&json!([{"id": 3}]));
        assert_eq!(extraction.id, ResourceId::Integer(1));
        assert!(extraction.used_fallback);
    }

    #[test]
    fn test_default_accepted_statuses() {
        let fixture = fixture();
        assert!(fixture.accepted.matches(200));
        assert!(fixture.accepted.matches(201));
        assert!(!fixture.accepted.matches(204));
    }
}

//! Contract test cases and their results.
//!
//! A [`TestCase`] describes one request and the outcome it must produce.
//! Status codes are always checked by membership in a non-empty set, never
//! by equality to a single fixed value: stubs generated from an API schema
//! may answer with any of the documented codes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::fixture::{FixtureOutcome, FixtureSpec};
use crate::request::{HttpMethod, RequestSpec};
use crate::response::StatusClass;

/// Non-empty set of acceptable status codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct StatusExpectation {
    codes: Vec<u16>,
}

impl StatusExpectation {
    /// Creates an expectation from a literal list of codes.
    ///
    /// An empty array is rejected at compile time.
    #[must_use]
    pub fn of<const N: usize>(codes: [u16; N]) -> Self {
        const { assert!(N > 0, "expected status set must not be empty") };
        Self {
            codes: dedup(codes),
        }
    }

    /// Creates an expectation from a runtime list of codes.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyStatusSet`] when `codes` is empty.
    pub fn try_new(codes: impl IntoIterator<Item = u16>) -> DomainResult<Self> {
        let codes = dedup(codes);
        if codes.is_empty() {
            return Err(DomainError::EmptyStatusSet);
        }
        Ok(Self { codes })
    }

    /// Check if a status code is in the set.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        self.codes.contains(&status)
    }

    /// Returns the codes in declaration order.
    #[must_use]
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        let codes: Vec<_> = self.codes.iter().map(ToString::to_string).collect();
        format!("in [{}]", codes.join(", "))
    }
}

fn dedup(codes: impl IntoIterator<Item = u16>) -> Vec<u16> {
    let mut out: Vec<u16> = Vec::new();
    for code in codes {
        if !out.contains(&code) {
            out.push(code);
        }
    }
    out
}

impl TryFrom<Vec<u16>> for StatusExpectation {
    type Error = DomainError;

    fn try_from(codes: Vec<u16>) -> DomainResult<Self> {
        Self::try_new(codes)
    }
}

impl From<StatusExpectation> for Vec<u16> {
    fn from(expectation: StatusExpectation) -> Self {
        expectation.codes
    }
}

/// Structural check on a JSON response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "keys", rename_all = "snake_case")]
pub enum BodyShape {
    /// Body is a JSON array.
    IsArray,
    /// Body is a JSON object containing every listed key.
    HasKeys(Vec<String>),
}

impl BodyShape {
    /// Builds a `HasKeys` shape.
    #[must_use]
    pub fn has_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::HasKeys(keys.into_iter().map(Into::into).collect())
    }

    /// Checks a parsed body against the shape.
    ///
    /// # Errors
    /// Returns a human-readable reason when the body does not match.
    pub fn check(&self, body: &Value) -> Result<(), String> {
        match self {
            Self::IsArray => {
                if body.is_array() {
                    Ok(())
                } else {
                    Err(format!("expected a JSON array, got {}", json_kind(body)))
                }
            }
            Self::HasKeys(keys) => {
                let Some(object) = body.as_object() else {
                    return Err(format!("expected a JSON object, got {}", json_kind(body)));
                };
                let missing: Vec<&str> = keys
                    .iter()
                    .filter(|k| !object.contains_key(k.as_str()))
                    .map(String::as_str)
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(format!("missing keys: {}", missing.join(", ")))
                }
            }
        }
    }

    /// Get a human-readable description of this shape.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::IsArray => "is an array".to_string(),
            Self::HasKeys(keys) => format!("has keys {{{}}}", keys.join(", ")),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A check run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// Status code is a member of the expected set.
    StatusCode {
        /// Acceptable statuses.
        expected: StatusExpectation,
    },
    /// Body matches a structural predicate. Only evaluated on 2xx.
    BodyShape {
        /// The predicate.
        shape: BodyShape,
    },
}

impl Assertion {
    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {}", expected.description()),
            Self::BodyShape { shape } => format!("Body {}", shape.description()),
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// True when the assertion did not apply to this response.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result.
    #[must_use]
    pub const fn pass(assertion: Assertion) -> Self {
        Self {
            assertion,
            passed: true,
            skipped: false,
            actual: None,
            error: None,
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::pass(assertion)
        }
    }

    /// Create a result for an assertion that did not apply.
    #[must_use]
    pub fn skipped(assertion: Assertion, reason: impl Into<String>) -> Self {
        Self {
            skipped: true,
            actual: Some(reason.into()),
            ..Self::pass(assertion)
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            skipped: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::fail(assertion, error)
        }
    }
}

/// Target resource a case belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceGroup {
    /// `/pets`
    Pets,
    /// `/users`
    Users,
    /// `/things`
    Things,
    /// `/auth/token`
    AuthToken,
}

impl ResourceGroup {
    /// Every group, in catalog order.
    pub const ALL: [Self; 4] = [Self::Pets, Self::Users, Self::Things, Self::AuthToken];

    /// Returns the group name used on the command line and in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pets => "pets",
            Self::Users => "users",
            Self::Things => "things",
            Self::AuthToken => "auth-token",
        }
    }
}

impl fmt::Display for ResourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "pets" => Ok(Self::Pets),
            "users" => Ok(Self::Users),
            "things" => Ok(Self::Things),
            "auth-token" | "auth" => Ok(Self::AuthToken),
            other => Err(DomainError::InvalidIdentifier(format!("unknown group `{other}`"))),
        }
    }
}

/// One declared request and the outcome it must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique case name within its group.
    pub name: String,
    /// Target resource.
    pub group: ResourceGroup,
    /// The request to send.
    pub request: RequestSpec,
    /// Acceptable statuses.
    pub expected: StatusExpectation,
    /// Optional structural check on 2xx bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_shape: Option<BodyShape>,
    /// Resource created before the request is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<FixtureSpec>,
    /// Number of identical sends; each response is evaluated.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

const fn default_repeat() -> u32 {
    1
}

impl TestCase {
    /// Creates a case.
    #[must_use]
    pub fn new(
        group: ResourceGroup,
        name: impl Into<String>,
        request: RequestSpec,
        expected: StatusExpectation,
    ) -> Self {
        Self {
            name: name.into(),
            group,
            request,
            expected,
            body_shape: None,
            fixture: None,
            repeat: 1,
        }
    }

    /// Adds a body-shape predicate.
    #[must_use]
    pub fn expect_body(mut self, shape: BodyShape) -> Self {
        self.body_shape = Some(shape);
        self
    }

    /// Adds a fixture.
    #[must_use]
    pub fn with_fixture(mut self, fixture: FixtureSpec) -> Self {
        self.fixture = Some(fixture);
        self
    }

    /// Sends the request `times` times (at least once).
    #[must_use]
    pub fn repeated(mut self, times: u32) -> Self {
        self.repeat = times.max(1);
        self
    }

    /// Returns `group/name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.group, self.name)
    }

    /// Returns the assertions evaluated against every response.
    #[must_use]
    pub fn assertions(&self) -> Vec<Assertion> {
        let mut assertions = vec![Assertion::StatusCode {
            expected: self.expected.clone(),
        }];
        if let Some(shape) = &self.body_shape {
            assertions.push(Assertion::BodyShape {
                shape: shape.clone(),
            });
        }
        assertions
    }
}

/// Final verdict for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Every assertion passed.
    Passed,
    /// At least one assertion failed.
    Failed,
    /// The case could not be evaluated (setup or transport failure).
    Errored,
}

impl CaseOutcome {
    /// Returns the report label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Errored => "ERROR",
        }
    }
}

/// Result of running one case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseResult {
    /// Case name.
    pub name: String,
    /// Target resource.
    pub group: ResourceGroup,
    /// HTTP method sent.
    pub method: HttpMethod,
    /// Absolute URL (or display target when the URL could not be built).
    pub target: String,
    /// Last status received, if any.
    pub status: Option<u16>,
    /// Classification of `status`.
    pub status_class: Option<StatusClass>,
    /// Assertion results across all sends.
    pub assertions: Vec<AssertionResult>,
    /// Fixture outcome, when the case has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<FixtureOutcome>,
    /// Setup or transport error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Verdict.
    pub outcome: CaseOutcome,
    /// Wall time for the case, fixture included.
    pub duration_ms: u64,
}

impl CaseResult {
    /// Returns true if the case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == CaseOutcome::Passed
    }

    /// Returns true if the fixture fell back to its default id.
    #[must_use]
    pub fn used_fallback_id(&self) -> bool {
        self.fixture.as_ref().is_some_and(|f| f.used_fallback)
    }

    /// Returns the assertions that failed.
    pub fn failures(&self) -> impl Iterator<Item = &AssertionResult> {
        self.assertions.iter().filter(|a| !a.passed)
    }

    /// Derives the verdict from assertion results.
    #[must_use]
    pub fn outcome_of(assertions: &[AssertionResult]) -> CaseOutcome {
        if assertions.iter().all(|a| a.passed) {
            CaseOutcome::Passed
        } else {
            CaseOutcome::Failed
        }
    }
}

/// Results from running a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    /// Run identifier.
    pub run_id: String,
    /// Suite name.
    pub suite_name: String,
    /// Base URL the suite ran against.
    pub base_url: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Individual case results, in execution order.
    pub cases: Vec<CaseResult>,
    /// Total number of cases.
    pub total: usize,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Number of errored cases.
    pub errored: usize,
    /// Number of cases whose fixture used the fallback id.
    pub fallback_ids: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl TestResults {
    /// Create new test results.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        base_url: impl Into<String>,
        started_at: DateTime<Utc>,
        cases: Vec<CaseResult>,
        duration_ms: u64,
    ) -> Self {
        let count = |outcome| cases.iter().filter(|c| c.outcome == outcome).count();
        let passed = count(CaseOutcome::Passed);
        let failed = count(CaseOutcome::Failed);
        let errored = count(CaseOutcome::Errored);
        let fallback_ids = cases.iter().filter(|c| c.used_fallback_id()).count();

        Self {
            run_id: crate::id::generate_id(),
            suite_name: suite_name.into(),
            base_url: base_url.into(),
            started_at,
            total: cases.len(),
            cases,
            passed,
            failed,
            errored,
            fallback_ids,
            duration_ms,
        }
    }

    /// Check if all cases passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_expectation_membership() {
        let exp = StatusExpectation::of([404, 204, 200]);
        assert!(exp.matches(404));
        assert!(exp.matches(204));
        assert!(exp.matches(200));
        assert!(!exp.matches(201));
        assert_eq!(exp.description(), "in [404, 204, 200]");
    }

    #[test]
    fn test_status_expectation_rejects_empty() {
        assert_eq!(
            StatusExpectation::try_new(Vec::new()),
            Err(DomainError::EmptyStatusSet)
        );
        let parsed: Result<StatusExpectation, _> = serde_json::from_str("[]");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_status_expectation_dedups() {
        let exp = StatusExpectation::try_new([400, 422, 400]).unwrap();
        assert_eq!(exp.codes(), &[400, 422]);
    }

    #[test]
    fn test_body_shape_array() {
        assert!(BodyShape::IsArray.check(&json!([])).is_ok());
        assert_eq!(
            BodyShape::IsArray.check(&json!({"items": []})),
            Err("expected a JSON array, got an object".to_string())
        );
    }

    #[test]
    fn test_body_shape_keys() {
        let shape = BodyShape::has_keys(["id", "name"]);
        assert!(shape.check(&json!({"id": 1, "name": "Fluffy", "tag": "dog"})).is_ok());
        assert_eq!(
            shape.check(&json!({"name": "Fluffy"})),
            Err("missing keys: id".to_string())
        );
        assert!(shape.check(&json!([1])).is_err());
        assert_eq!(shape.description(), "has keys {id, name}");
    }

    #[test]
    fn test_assertion_description() {
        let assertion = Assertion::StatusCode {
            expected: StatusExpectation::of([400, 422]),
        };
        assert_eq!(assertion.description(), "Status code in [400, 422]");
    }

    #[test]
    fn test_case_assertions() {
        let case = TestCase::new(
            ResourceGroup::Pets,
            "get_all_pets",
            RequestSpec::get("/pets").unwrap(),
            StatusExpectation::of([200]),
        )
        .expect_body(BodyShape::IsArray);

        assert_eq!(case.assertions().len(), 2);
        assert_eq!(case.qualified_name(), "pets/get_all_pets");
    }

    #[test]
    fn test_repeat_is_at_least_one() {
        let case = TestCase::new(
            ResourceGroup::Pets,
            "x",
            RequestSpec::get("/pets").unwrap(),
            StatusExpectation::of([200]),
        )
        .repeated(0);
        assert_eq!(case.repeat, 1);
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!("auth_token".parse::<ResourceGroup>().unwrap(), ResourceGroup::AuthToken);
        assert_eq!("Things".parse::<ResourceGroup>().unwrap(), ResourceGroup::Things);
        assert!("orders".parse::<ResourceGroup>().is_err());
    }

    fn case_result(outcome: CaseOutcome, used_fallback: bool) -> CaseResult {
        CaseResult {
            name: "c".to_string(),
            group: ResourceGroup::Pets,
            method: HttpMethod::Get,
            target: "http://localhost:4010/pets".to_string(),
            status: Some(200),
            status_class: Some(StatusClass::Success),
            assertions: Vec::new(),
            fixture: used_fallback.then(|| FixtureOutcome {
                status: 200,
                id: crate::fixture::ResourceId::Integer(1),
                used_fallback: true,
            }),
            error: None,
            outcome,
            duration_ms: 1,
        }
    }

    #[test]
    fn test_test_results_totals() {
        let results = TestResults::new(
            "contract",
            "http://localhost:4010/",
            Utc::now(),
            vec![
                case_result(CaseOutcome::Passed, true),
                case_result(CaseOutcome::Failed, false),
                case_result(CaseOutcome::Errored, false),
                case_result(CaseOutcome::Passed, false),
            ],
            12,
        );
        assert_eq!(results.total, 4);
        assert_eq!(results.passed, 2);
        assert_eq!(results.failed, 1);
        assert_eq!(results.errored, 1);
        assert_eq!(results.fallback_ids, 1);
        assert!(!results.all_passed());
        assert!((results.pass_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outcome_of() {
        let pass = AssertionResult::pass(Assertion::StatusCode {
            expected: StatusExpectation::of([200]),
        });
        let fail = AssertionResult::fail(
            Assertion::BodyShape {
                shape: BodyShape::IsArray,
            },
            "expected a JSON array",
        );
        assert_eq!(CaseResult::outcome_of(&[pass.clone()]), CaseOutcome::Passed);
        assert_eq!(CaseResult::outcome_of(&[pass, fail]), CaseOutcome::Failed);
    }
}

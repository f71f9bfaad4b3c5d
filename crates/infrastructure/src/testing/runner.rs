//! Assertion runner.
//!
//! Evaluates a case's assertions against one HTTP response.

use stubprobe_application::ports::ResponseVerifier;
use stubprobe_domain::{
    Assertion, AssertionResult, BodyShape, ResponseSpec, StatusExpectation, TestCase,
};

/// Test runner that executes assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                self.check_status_code(assertion, response, expected)
            }
            Assertion::BodyShape { shape } => self.check_body_shape(assertion, response, shape),
        }
    }

    fn check_status_code(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &StatusExpectation,
    ) -> AssertionResult {
        let actual = response.status;
        if expected.matches(actual) {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!("Expected status {}, got {}", expected.description(), actual),
            )
        }
    }

    fn check_body_shape(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        shape: &BodyShape,
    ) -> AssertionResult {
        if !response.status_code().is_success() {
            return AssertionResult::skipped(
                assertion.clone(),
                format!("not checked on status {}", response.status),
            );
        }

        let body = match response.json() {
            Ok(body) => body,
            Err(e) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    format!("Response body is not valid JSON: {e}"),
                );
            }
        };

        match shape.check(&body) {
            Ok(()) => AssertionResult::pass(assertion.clone()),
            Err(reason) => AssertionResult::fail(assertion.clone(), reason),
        }
    }
}

impl ResponseVerifier for TestRunner {
    fn verify(&self, case: &TestCase, response: &ResponseSpec) -> Vec<AssertionResult> {
        case.assertions()
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect()
    }
}

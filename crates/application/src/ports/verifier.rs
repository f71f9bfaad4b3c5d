//! Response verification port

use stubprobe_domain::{AssertionResult, ResponseSpec, TestCase};

/// Evaluates a response against a case's assertions.
pub trait ResponseVerifier: Send + Sync {
    /// Returns one result per assertion of `case`, in declaration order.
    fn verify(&self, case: &TestCase, response: &ResponseSpec) -> Vec<AssertionResult>;
}

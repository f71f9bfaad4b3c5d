//! Run suite use case.

use std::time::Instant;

use stubprobe_domain::{TestCase, TestResults};
use tracing::info;
use url::Url;

use super::ExecuteCase;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, HttpClient, ResponseVerifier};

/// Input for running a suite.
#[derive(Debug, Clone)]
pub struct RunSuiteInput<'c> {
    /// Name recorded on the results.
    pub suite_name: String,
    /// Cases to run, in order.
    pub cases: Vec<&'c TestCase>,
}

/// Runs a selection of cases one after another.
pub struct RunSuite<'a, C: ?Sized, V: ?Sized, K: ?Sized> {
    client: &'a C,
    verifier: &'a V,
    clock: &'a K,
    base_url: &'a Url,
}

impl<'a, C, V, K> RunSuite<'a, C, V, K>
where
    C: HttpClient + ?Sized,
    V: ResponseVerifier + ?Sized,
    K: Clock + ?Sized,
{
    /// Creates a new `RunSuite` use case.
    #[must_use]
    pub const fn new(client: &'a C, verifier: &'a V, clock: &'a K, base_url: &'a Url) -> Self {
        Self {
            client,
            verifier,
            clock,
            base_url,
        }
    }

    /// Runs every case sequentially; a failing case never stops the run.
    ///
    /// # Errors
    /// Returns [`ApplicationError::NothingSelected`] if `input.cases` is empty.
    pub async fn execute(&self, input: RunSuiteInput<'_>) -> ApplicationResult<TestResults> {
        if input.cases.is_empty() {
            return Err(ApplicationError::NothingSelected);
        }

        let started_at = self.clock.now();
        let started = Instant::now();
        info!(
            suite = %input.suite_name,
            base_url = %self.base_url,
            cases = input.cases.len(),
            "starting run"
        );

        let execute = ExecuteCase::new(self.client, self.verifier, self.base_url);
        let mut results = Vec::with_capacity(input.cases.len());
        for case in input.cases {
            results.push(execute.execute(case).await);
        }

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let results = TestResults::new(
            input.suite_name,
            self.base_url.as_str(),
            started_at,
            results,
            duration_ms,
        );
        info!(
            passed = results.passed,
            failed = results.failed,
            errored = results.errored,
            fallback_ids = results.fallback_ids,
            duration_ms,
            "run finished"
        );

        Ok(results)
    }
}

//! Execute case use case.

use std::time::Instant;

use stubprobe_domain::{
    AssertionResult, CaseOutcome, CaseResult, FixtureOutcome, RequestSpec, StatusClass,
    StatusCode, TestCase,
};
use tracing::{debug, error, info, warn};
use url::Url;

use super::ResolveFixture;
use crate::ports::{HttpClient, OutgoingRequest, ResponseVerifier};

/// Runs a single case: fixture, request (possibly repeated) and verification.
///
/// Never fails as a whole. Setup and transport problems are captured on the
/// returned [`CaseResult`] as [`CaseOutcome::Errored`].
pub struct ExecuteCase<'a, C: ?Sized, V: ?Sized> {
    client: &'a C,
    verifier: &'a V,
    base_url: &'a Url,
}

/// Partially built result, carried through the steps of one case.
struct Progress {
    target: String,
    fixture: Option<FixtureOutcome>,
    status: Option<u16>,
    assertions: Vec<AssertionResult>,
    started: Instant,
}

impl Progress {
    fn finish(self, case: &TestCase, outcome: CaseOutcome, error: Option<String>) -> CaseResult {
        let duration_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        CaseResult {
            name: case.name.clone(),
            group: case.group,
            method: case.request.method,
            target: self.target,
            status: self.status,
            status_class: self.status.map(|s| StatusCode::new(s).class()),
            assertions: self.assertions,
            fixture: self.fixture,
            error,
            outcome,
            duration_ms,
        }
    }
}

fn display_target(request: &RequestSpec) -> String {
    request
        .display_target()
        .unwrap_or_else(|_| request.path.to_string())
}

impl<'a, C, V> ExecuteCase<'a, C, V>
where
    C: HttpClient + ?Sized,
    V: ResponseVerifier + ?Sized,
{
    /// Creates a new `ExecuteCase` use case.
    #[must_use]
    pub const fn new(client: &'a C, verifier: &'a V, base_url: &'a Url) -> Self {
        Self {
            client,
            verifier,
            base_url,
        }
    }

    /// Runs the case and returns its result.
    pub async fn execute(&self, case: &TestCase) -> CaseResult {
        let mut request = case.request.clone();
        let mut progress = Progress {
            target: display_target(&request),
            fixture: None,
            status: None,
            assertions: Vec::new(),
            started: Instant::now(),
        };

        if let Some(fixture) = &case.fixture {
            match ResolveFixture::new(self.client, self.base_url)
                .execute(fixture)
                .await
            {
                Ok(outcome) => {
                    request.bind_path_param(&fixture.bind_as, outcome.id.to_string());
                    progress.target = display_target(&request);
                    progress.fixture = Some(outcome);
                }
                Err(e) => {
                    warn!(case = %case.qualified_name(), error = %e, "fixture setup failed");
                    return progress.finish(case, CaseOutcome::Errored, Some(e.to_string()));
                }
            }
        }

        let outgoing = match OutgoingRequest::prepare(&request, self.base_url) {
            Ok(outgoing) => outgoing,
            Err(e) => {
                warn!(case = %case.qualified_name(), error = %e, "request could not be built");
                return progress.finish(case, CaseOutcome::Errored, Some(e.to_string()));
            }
        };
        progress.target = outgoing.url.to_string();

        for attempt in 1..=case.repeat {
            debug!(
                method = %outgoing.method,
                url = %outgoing.url,
                auth = outgoing.auth.label(),
                attempt,
                "sending request"
            );
            match self.client.execute(&outgoing).await {
                Ok(response) => {
                    progress.status = Some(response.status);
                    progress
                        .assertions
                        .extend(self.verifier.verify(case, &response));
                }
                Err(e) => {
                    error!(case = %case.qualified_name(), attempt, error = %e, "transport error");
                    return progress.finish(case, CaseOutcome::Errored, Some(e.to_string()));
                }
            }
        }

        let outcome = CaseResult::outcome_of(&progress.assertions);
        let result = progress.finish(case, outcome, None);
        info!(
            case = %case.qualified_name(),
            outcome = outcome.label(),
            status = result.status.unwrap_or_default(),
            class = %result.status_class.unwrap_or(StatusClass::Other),
            "case finished"
        );
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{ScriptedClient, StatusVerifier, base_url};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use stubprobe_domain::{FixtureSpec, ResourceGroup, ResourceId, StatusExpectation};

    async fn run(client: &ScriptedClient, case: &TestCase) -> CaseResult {
        let base = base_url();
        ExecuteCase::new(client, &StatusVerifier, &base)
            .execute(case)
            .await
    }

    fn pet_by_id() -> TestCase {
        TestCase::new(
            ResourceGroup::Pets,
            "get_pet_by_id",
            RequestSpec::get("/pets/{id}").unwrap(),
            StatusExpectation::of([200]),
        )
        .with_fixture(FixtureSpec::create(
            RequestSpec::post("/pets")
                .unwrap()
                .with_json(json!({"name": "Fluffy", "tag": "dog"})),
        ))
    }

    #[tokio::test]
    async fn test_status_in_set_passes() {
        let client = ScriptedClient::new().respond(404, "{}");
        let case = TestCase::new(
            ResourceGroup::Pets,
            "get_pet_by_id_not_found",
            RequestSpec::get("/pets/999999").unwrap(),
            StatusExpectation::of([404, 200]),
        );
        let result = run(&client, &case).await;

        assert_eq!(result.outcome, CaseOutcome::Passed);
        assert_eq!(result.status, Some(404));
        assert_eq!(result.status_class, Some(StatusClass::NotFound));
        assert_eq!(result.target, "http://localhost:4010/pets/999999");
    }

    #[tokio::test]
    async fn test_status_outside_set_fails() {
        let client = ScriptedClient::new().respond(200, "[]");
        let case = TestCase::new(
            ResourceGroup::Users,
            "list_users_unauthorized",
            RequestSpec::get("/users").unwrap(),
            StatusExpectation::of([401]),
        );
        let result = run(&client, &case).await;

        assert_eq!(result.outcome, CaseOutcome::Failed);
        assert_eq!(result.failures().count(), 1);
    }

    #[tokio::test]
    async fn test_fixture_id_is_bound_into_path() {
        let client = ScriptedClient::new()
            .respond(201, r#"{"id": 42, "name": "Fluffy"}"#)
            .respond(200, r#"{"id": 42, "name": "Fluffy"}"#);
        let result = run(&client, &pet_by_id()).await;

        assert_eq!(result.outcome, CaseOutcome::Passed);
        assert_eq!(
            client.sent(),
            vec![
                "POST http://localhost:4010/pets".to_string(),
                "GET http://localhost:4010/pets/42".to_string(),
            ]
        );
        let fixture = result.fixture.unwrap();
        assert_eq!(fixture.id, ResourceId::Integer(42));
        assert!(!fixture.used_fallback);
    }

    #[tokio::test]
    async fn test_fixture_fallback_is_flagged() {
        let client = ScriptedClient::new()
            .respond(200, r#"{"name": "Fluffy"}"#)
            .respond(200, r#"{"id": 1, "name": "Fluffy"}"#);
        let result = run(&client, &pet_by_id()).await;

        assert_eq!(result.outcome, CaseOutcome::Passed);
        assert!(result.used_fallback_id());
        assert_eq!(client.sent()[1], "GET http://localhost:4010/pets/1");
    }

    #[tokio::test]
    async fn test_fixture_failure_errors_without_dependent_request() {
        let client = ScriptedClient::new().respond(500, "{}");
        let result = run(&client, &pet_by_id()).await;

        assert_eq!(result.outcome, CaseOutcome::Errored);
        assert_eq!(client.sent().len(), 1);
        assert_eq!(result.status, None);
        assert_eq!(
            result.error.as_deref(),
            Some("fixture returned status 500, expected in [200, 201]")
        );
    }

    #[tokio::test]
    async fn test_transport_error_marks_case_errored() {
        let client = ScriptedClient::new().refuse();
        let case = TestCase::new(
            ResourceGroup::AuthToken,
            "get_token_unauthorized",
            RequestSpec::get("/auth/token").unwrap(),
            StatusExpectation::of([401]),
        );
        let result = run(&client, &case).await;

        assert_eq!(result.outcome, CaseOutcome::Errored);
        assert_eq!(
            result.error.as_deref(),
            Some("connection refused by localhost:4010")
        );
    }

    #[tokio::test]
    async fn test_timeout_marks_case_errored() {
        let client = ScriptedClient::new().time_out(100);
        let case = TestCase::new(
            ResourceGroup::Users,
            "list_users_success",
            RequestSpec::get("/users").unwrap(),
            StatusExpectation::of([200, 204]),
        );
        let result = run(&client, &case).await;

        assert_eq!(result.outcome, CaseOutcome::Errored);
        assert_eq!(result.status, None);
        assert!(result.assertions.is_empty());
        assert_eq!(result.error.as_deref(), Some("request timed out after 100 ms"));
    }

    #[tokio::test]
    async fn test_unbound_placeholder_errors_without_sending() {
        let client = ScriptedClient::new().respond(200, "{}");
        let case = TestCase::new(
            ResourceGroup::Pets,
            "delete_pet_success",
            RequestSpec::delete("/pets/{id}").unwrap(),
            StatusExpectation::of([204, 200]),
        );
        let result = run(&client, &case).await;

        assert_eq!(result.outcome, CaseOutcome::Errored);
        assert!(client.sent().is_empty());
        assert_eq!(result.target, "/pets/{id}");
        assert_eq!(
            result.error.as_deref(),
            Some("missing path parameter `id` for template /pets/{id}")
        );
    }

    #[tokio::test]
    async fn test_invalid_header_errors_without_sending() {
        let client = ScriptedClient::new().respond(200, "[]");
        let case = TestCase::new(
            ResourceGroup::Things,
            "list_things_basic",
            RequestSpec::get("/things")
                .unwrap()
                .with_header("Bad Header", "x"),
            StatusExpectation::of([200, 204]),
        );
        let result = run(&client, &case).await;

        assert_eq!(result.outcome, CaseOutcome::Errored);
        assert!(client.sent().is_empty());
        assert_eq!(result.error.as_deref(), Some("invalid header name: Bad Header"));
    }

    #[tokio::test]
    async fn test_repeat_evaluates_every_response() {
        let client = ScriptedClient::new().respond(200, "[]").respond(500, "{}");
        let case = TestCase::new(
            ResourceGroup::Pets,
            "get_pets_is_idempotent",
            RequestSpec::get("/pets").unwrap().with_query("limit", "5"),
            StatusExpectation::of([200]),
        )
        .repeated(2);
        let result = run(&client, &case).await;

        assert_eq!(client.sent().len(), 2);
        assert_eq!(result.assertions.len(), 2);
        assert_eq!(result.outcome, CaseOutcome::Failed);
        assert_eq!(result.status, Some(500));
    }
}

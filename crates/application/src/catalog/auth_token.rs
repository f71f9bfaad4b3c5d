//! `/auth/token` cases.

use stubprobe_domain::{DomainResult, RequestSpec, ResourceGroup, StatusExpectation, TestCase};

use super::Credentials;

pub(super) fn cases(credentials: &Credentials) -> DomainResult<Vec<TestCase>> {
    Ok(vec![
        TestCase::new(
            ResourceGroup::AuthToken,
            "get_token_success",
            RequestSpec::get("/auth/token")?.with_auth(credentials.basic()),
            StatusExpectation::of([200]),
        ),
        TestCase::new(
            ResourceGroup::AuthToken,
            "get_token_unauthorized",
            RequestSpec::get("/auth/token")?,
            StatusExpectation::of([401]),
        ),
    ])
}

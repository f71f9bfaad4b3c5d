//! Resolve fixture use case.

use stubprobe_domain::{FixtureOutcome, FixtureSpec};
use tracing::{debug, warn};
use url::Url;

use crate::error::FixtureError;
use crate::ports::{HttpClient, OutgoingRequest};

/// Creates the resource a dependent request needs and returns its id.
pub struct ResolveFixture<'a, C: ?Sized> {
    client: &'a C,
    base_url: &'a Url,
}

impl<'a, C: HttpClient + ?Sized> ResolveFixture<'a, C> {
    /// Creates a new `ResolveFixture` use case.
    #[must_use]
    pub const fn new(client: &'a C, base_url: &'a Url) -> Self {
        Self { client, base_url }
    }

    /// Issues the creation request and extracts the identifier.
    ///
    /// A response without a usable id falls back to the fixture's literal
    /// default and is flagged on the returned outcome.
    ///
    /// # Errors
    /// - Returns error if the creation request cannot be built or sent
    /// - Returns error if the status is not accepted
    /// - Returns error if the body is not JSON
    pub async fn execute(&self, fixture: &FixtureSpec) -> Result<FixtureOutcome, FixtureError> {
        let request = OutgoingRequest::prepare(&fixture.request, self.base_url)?;
        debug!(method = %request.method, url = %request.url, "creating fixture");

        let response = self.client.execute(&request).await?;
        if !fixture.accepted.matches(response.status) {
            return Err(FixtureError::UnexpectedStatus {
                status: response.status,
                expected: fixture.accepted.description(),
            });
        }

        let body = response
            .json()
            .map_err(|e| FixtureError::InvalidBody(e.to_string()))?;
        let extraction = fixture.extract_id(&body);
        if extraction.used_fallback {
            warn!(
                field = %fixture.id_field,
                fallback = %extraction.id,
                "used fallback id: fixture response carried no identifier"
            );
        }

        Ok(FixtureOutcome::new(response.status, extraction))
    }
}

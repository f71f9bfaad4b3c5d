//! The declared contract cases.
//!
//! Cases are grouped by the resource they target and kept in declaration
//! order. Every case is independent: the only sequencing is a fixture
//! request that runs inside its own case.

mod auth_token;
mod pets;
mod things;
mod users;

use std::ops::RangeInclusive;

use stubprobe_domain::{AuthConfig, DomainResult, RequestSpec, ResourceGroup, TestCase};

/// Valid `quantity` values accepted by `POST /things`.
pub const QUANTITY_RANGE: RangeInclusive<i64> = 1..=1000;

/// Credentials the catalog bakes into authenticated cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Token sent as `Authorization: Bearer <token>`.
    pub bearer_token: String,
    /// Basic auth user for `/auth/token`.
    pub basic_username: String,
    /// Basic auth password for `/auth/token`.
    pub basic_password: String,
}

impl Credentials {
    fn bearer(&self) -> AuthConfig {
        AuthConfig::bearer(&self.bearer_token)
    }

    fn basic(&self) -> AuthConfig {
        AuthConfig::basic(&self.basic_username, &self.basic_password)
    }

    /// Bearer auth plus an explicit JSON content type, as the users and
    /// things APIs expect on every authenticated call.
    fn authenticated(&self, request: RequestSpec) -> RequestSpec {
        request
            .with_auth(self.bearer())
            .with_header("Content-Type", "application/json")
    }
}

/// The full set of declared cases.
#[derive(Debug, Clone)]
pub struct Catalog {
    cases: Vec<TestCase>,
}

impl Catalog {
    /// Builds every case using the given credentials.
    ///
    /// # Errors
    /// Returns a domain error if a declared path template is malformed.
    pub fn new(credentials: &Credentials) -> DomainResult<Self> {
        let mut cases = Vec::new();
        for group in ResourceGroup::ALL {
            cases.extend(match group {
                ResourceGroup::Pets => pets::cases()?,
                ResourceGroup::Users => users::cases(credentials)?,
                ResourceGroup::Things => things::cases(credentials)?,
                ResourceGroup::AuthToken => auth_token::cases(credentials)?,
            });
        }
        Ok(Self { cases })
    }

    /// All cases in declaration order.
    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Cases whose group is in `groups` (all groups when empty) and whose
    /// name contains `name_filter`, if given.
    #[must_use]
    pub fn select(&self, groups: &[ResourceGroup], name_filter: Option<&str>) -> Vec<&TestCase> {
        self.cases
            .iter()
            .filter(|c| groups.is_empty() || groups.contains(&c.group))
            .filter(|c| name_filter.is_none_or(|f| c.name.contains(f)))
            .collect()
    }
}

//! Stubprobe Domain - Core contract-testing types
//!
//! This crate defines the domain model for the stubprobe harness: requests,
//! responses, test cases, status expectations and fixture handling.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod fixture;
pub mod id;
pub mod request;
pub mod response;
pub mod testing;

pub use auth::AuthConfig;
pub use error::{DomainError, DomainResult};
pub use fixture::{FixtureOutcome, FixtureSpec, IdExtraction, ResourceId};
pub use id::{generate_id, random_resource_id};
pub use request::{
    Header, Headers, HttpMethod, PathTemplate, QueryParam, QueryParams, RequestBody, RequestSpec,
};
pub use response::{ResponseSpec, StatusClass, StatusCode};
pub use testing::{
    Assertion, AssertionResult, BodyShape, CaseOutcome, CaseResult, ResourceGroup,
    StatusExpectation, TestCase, TestResults,
};

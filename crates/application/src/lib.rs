//! Stubprobe Application - Ports, catalog and use cases
//!
//! This crate orchestrates a contract-test run: it declares the case
//! catalog, defines the ports the infrastructure layer implements, and
//! sequences fixture resolution, request execution and verification.

pub mod catalog;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use catalog::{Catalog, Credentials, QUANTITY_RANGE};
pub use error::{ApplicationError, ApplicationResult, FixtureError};
pub use use_cases::{ExecuteCase, ResolveFixture, RunSuite, RunSuiteInput};

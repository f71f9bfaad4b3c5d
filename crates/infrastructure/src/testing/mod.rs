//! Assertion evaluation for contract cases.

mod runner;

pub use runner::TestRunner;

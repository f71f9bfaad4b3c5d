//! Application use cases (run orchestration).

mod execute_case;
mod resolve_fixture;
mod run_suite;

pub use execute_case::*;
pub use resolve_fixture::*;
pub use run_suite::*;

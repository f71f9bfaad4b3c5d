//! Clock port for run timestamps

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Runs record their start time through this port so tests can pin it.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

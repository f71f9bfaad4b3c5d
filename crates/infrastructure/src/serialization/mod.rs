//! Deterministic JSON serialization for run reports.
//!
//! Two runs with identical outcomes produce byte-identical reports apart
//! from timing and run id, so reports diff cleanly.

mod json;

pub use json::*;

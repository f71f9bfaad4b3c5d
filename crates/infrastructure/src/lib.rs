//! Stubprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading and
//! report rendering.

pub mod adapters;
pub mod config;
pub mod report;
pub mod serialization;
pub mod testing;

pub use adapters::{DEFAULT_USER_AGENT, ReqwestHttpClient, SystemClock};
pub use config::{ConfigError, ConfigFile, ConfigLoader, ConfigOverrides, SuiteConfig};
pub use report::{render_json, render_listing, render_text, write_json_report};
pub use serialization::{SerializationError, to_json_stable, to_json_stable_bytes};
pub use testing::TestRunner;

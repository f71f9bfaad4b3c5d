//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stubprobe_domain::{DomainError, ResourceGroup};

/// Contract tests for the pet store and users/things stub APIs.
#[derive(Parser, Debug, Clone)]
#[command(name = "stubprobe", version, about)]
pub struct Cli {
    /// YAML configuration file.
    #[arg(long, value_name = "FILE", env = "STUBPROBE_CONFIG")]
    pub config: Option<PathBuf>,
    /// Stub base URL (overrides file and `STUBPROBE_BASE_URL`).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Per-request timeout in milliseconds (overrides file and environment).
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
    /// Restrict the run to a group; repeatable. All groups when omitted.
    #[arg(long = "group", value_name = "GROUP", value_parser = parse_group)]
    pub groups: Vec<ResourceGroup>,
    /// Only run cases whose name contains this text.
    #[arg(long, value_name = "SUBSTRING")]
    pub filter: Option<String>,
    /// Report format written to stdout.
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    /// Also write the JSON report to this file.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
    /// Print the selected cases without sending any request.
    #[arg(long)]
    pub list: bool,
}

/// Stdout report format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One line per case plus a summary.
    Text,
    /// Serialized run results.
    Json,
}

fn parse_group(value: &str) -> Result<ResourceGroup, String> {
    value.parse().map_err(|e: DomainError| e.to_string())
}

//! Stubprobe - contract-testing harness entry points
//!
//! The binary is a thin wrapper around [`load_config`] and [`execute`];
//! both are public so end-to-end tests can drive a full run in-process.

pub mod cli;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use stubprobe_application::{Catalog, RunSuite, RunSuiteInput};
use stubprobe_infrastructure::{
    ConfigError, ConfigLoader, ConfigOverrides, ReqwestHttpClient, SuiteConfig, SystemClock,
    TestRunner, render_json, render_listing, render_text, write_json_report,
};
use tracing::info;

pub use cli::{Cli, ReportFormat};

/// Suite name recorded on every run.
pub const SUITE_NAME: &str = "stubprobe";

/// Resolves the configuration for `cli`.
///
/// # Errors
/// Returns an error if the file, environment or flags are invalid.
pub async fn load_config<E>(cli: &Cli, loader: &ConfigLoader<E>) -> Result<SuiteConfig, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        timeout_ms: cli.timeout_ms,
    };
    loader.load(cli.config.as_deref(), &overrides).await
}

/// Lists or runs the selected cases and writes the report to `out`.
///
/// Returns `true` when every selected case passed (always `true` for
/// `--list`).
///
/// # Errors
/// Returns an error if nothing is selected, the client cannot be built or a
/// report cannot be written.
pub async fn execute(cli: &Cli, config: Arc<SuiteConfig>, out: &mut impl Write) -> anyhow::Result<bool> {
    let catalog = Catalog::new(&config.credentials()).context("building case catalog")?;
    let selected = catalog.select(&cli.groups, cli.filter.as_deref());

    if cli.list {
        out.write_all(render_listing(selected.iter().copied()).as_bytes())?;
        return Ok(true);
    }

    let client = ReqwestHttpClient::new(&config.user_agent, config.timeout())
        .context("creating HTTP client")?;
    let runner = TestRunner::new();
    let clock = SystemClock::new();

    let results = RunSuite::new(&client, &runner, &clock, &config.base_url)
        .execute(RunSuiteInput {
            suite_name: SUITE_NAME.to_string(),
            cases: selected,
        })
        .await?;

    match cli.format {
        ReportFormat::Text => out.write_all(render_text(&results).as_bytes())?,
        ReportFormat::Json => out.write_all(render_json(&results)?.as_bytes())?,
    }
    out.flush()?;

    if let Some(path) = &cli.report {
        write_json_report(path, &results)
            .await
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(results.all_passed())
}

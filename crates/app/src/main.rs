//! stubprobe binary.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use stubprobe::{Cli, execute, load_config};
use stubprobe_infrastructure::ConfigLoader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli, &ConfigLoader::from_process_env()).await {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };

    tracing::info!(
        base_url = %config.base_url,
        "starting stubprobe v{}",
        env!("CARGO_PKG_VERSION")
    );

    match execute(&cli, config, &mut std::io::stdout().lock()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "run aborted");
            ExitCode::from(2)
        }
    }
}

//! Run report rendering.
//!
//! Text is meant for terminals and CI logs; JSON is the serialized
//! [`TestResults`] in the deterministic layout used for files on disk.

use std::fmt::Write as _;
use std::path::Path;

use stubprobe_domain::{CaseResult, TestCase, TestResults};

use crate::serialization::{SerializationError, to_json_stable, to_json_stable_bytes};

/// Renders one line per case followed by a summary line.
#[must_use]
pub fn render_text(results: &TestResults) -> String {
    let mut out = String::new();
    for case in &results.cases {
        write_case(&mut out, case);
    }
    let _ = writeln!(
        out,
        "\n{} cases: {} passed, {} failed, {} errored, {} fallback ids ({:.1}%) in {} ms",
        results.total,
        results.passed,
        results.failed,
        results.errored,
        results.fallback_ids,
        results.pass_rate(),
        results.duration_ms
    );
    out
}

fn write_case(out: &mut String, case: &CaseResult) {
    let response = match (case.status, case.status_class) {
        (Some(status), Some(class)) => format!("{status} {class}"),
        (Some(status), None) => status.to_string(),
        _ => "no response".to_string(),
    };
    let _ = write!(
        out,
        "{} {}/{} {} {} -> {}",
        case.outcome.label(),
        case.group,
        case.name,
        case.method,
        case.target,
        response
    );
    if case.used_fallback_id() {
        out.push_str(" (used fallback id)");
    }
    out.push('\n');

    for failure in case.failures() {
        let _ = writeln!(
            out,
            "    {}: {}",
            failure.assertion.description(),
            failure.error.as_deref().unwrap_or("failed")
        );
    }
    if let Some(error) = &case.error {
        let _ = writeln!(out, "    error: {error}");
    }
}

/// Renders the results as deterministic JSON.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn render_json(results: &TestResults) -> Result<String, SerializationError> {
    to_json_stable(results)
}

/// Writes the JSON report to `path`.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub async fn write_json_report(path: &Path, results: &TestResults) -> Result<(), SerializationError> {
    let bytes = to_json_stable_bytes(results)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Renders the case listing printed by `--list`.
#[must_use]
pub fn render_listing<'a>(cases: impl IntoIterator<Item = &'a TestCase>) -> String {
    let mut out = String::new();
    for case in cases {
        let target = case
            .request
            .display_target()
            .unwrap_or_else(|_| case.request.path.to_string());
        let _ = write!(
            out,
            "{}/{} {} {} expects {}",
            case.group,
            case.name,
            case.request.method,
            target,
            case.expected.description()
        );
        if case.fixture.is_some() {
            out.push_str(" (fixture)");
        }
        if case.repeat > 1 {
            let _ = write!(out, " (x{})", case.repeat);
        }
        out.push('\n');
    }
    out
}

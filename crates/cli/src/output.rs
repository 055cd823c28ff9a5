use clap::ValueEnum;
use convention_gate_core::render::render_summary;
use convention_gate_core::report::ValidationReport;
use serde::Serialize;
use std::io::Write;

use crate::errors::CliError;
use crate::trigger::TriggerContext;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// How reports are written to standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    #[default]
    Text,

    /// Machine readable JSON
    Json,
}

/// Everything a single run produced, as written in JSON mode
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<&'a TriggerContext>,

    pub passed: bool,

    pub reports: Vec<&'a ValidationReport>,
}

impl<'a> RunOutput<'a> {
    pub fn new(trigger: Option<&'a TriggerContext>, reports: Vec<&'a ValidationReport>) -> Self {
        Self {
            trigger,
            passed: reports.iter().all(|r| r.passed),
            reports,
        }
    }
}

/// Renders the run in the requested format.
pub fn format_run(run: &RunOutput<'_>, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(run
            .reports
            .iter()
            .map(|r| render_summary(r))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => serde_json::to_string_pretty(run)
            .map(|json| format!("{}\n", json))
            .map_err(|e| CliError::Other(format!("Failed to serialize the report: {}", e))),
    }
}

/// Writes the run to `writer` in the requested format.
pub fn write_run<W: Write>(
    writer: &mut W,
    run: &RunOutput<'_>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let text = format_run(run, format)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| CliError::IoError(format!("Failed to write the report: {}", e)))
}

/// Converts the outcome of a run into the process result.
pub fn into_result(run: &RunOutput<'_>) -> Result<(), CliError> {
    if run.passed {
        return Ok(());
    }

    let invalid: usize = run.reports.iter().map(|r| r.invalid_items.len()).sum();
    Err(CliError::ValidationFailed(format!(
        "{} candidate(s) do not follow the conventions",
        invalid
    )))
}

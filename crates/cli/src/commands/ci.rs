use clap::Args;
use convention_gate_core::commits::CommitRecord;
use convention_gate_core::render::render_comment;
use convention_gate_core::report::ValidationReport;
use convention_gate_core::ConventionGate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::{build_gate, GlobalOptions};
use crate::errors::CliError;
use crate::git;
use crate::output::{into_result, write_run, RunOutput};
use crate::trigger::{detect_trigger_from_env, TriggerContext};

#[cfg(test)]
#[path = "ci_tests.rs"]
mod tests;

/// Arguments for the ci command
#[derive(Args, Debug)]
pub struct CiArgs {
    /// Repository the commit range is read from
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// File the comment body is written to when a merge request fails validation
    #[arg(long)]
    pub comment_file: Option<PathBuf>,
}

/// Executes the `ci` command.
///
/// A push only has its branch name checked. A merge request has its source
/// branch name and every commit between the base and head revisions checked.
#[instrument]
pub fn execute(args: CiArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let gate = build_gate(options)?;
    let trigger = detect_trigger_from_env()?;

    let reports = evaluate(&gate, &trigger, |base, head| {
        git::commit_range(&args.repo, base, head)
    })?;

    let run = RunOutput::new(Some(&trigger), reports.iter().collect());
    write_run(&mut std::io::stdout().lock(), &run, options.format)?;

    if let (Some(path), Some(comment)) = (&args.comment_file, comment_body(&trigger, &reports)) {
        write_comment(path, &comment)?;
    }

    into_result(&run)
}

/// Runs the checks that apply to the trigger.
///
/// The commit range is fetched completely before any commit is validated; a
/// failure to fetch it aborts the run.
pub fn evaluate<F>(
    gate: &ConventionGate,
    trigger: &TriggerContext,
    fetch_commits: F,
) -> Result<Vec<ValidationReport>, CliError>
where
    F: FnOnce(&str, &str) -> Result<Vec<CommitRecord>, CliError>,
{
    let branch = gate.validate_branch(trigger.branch());

    match trigger {
        TriggerContext::Push { .. } => Ok(vec![branch]),
        TriggerContext::MergeRequest { base, head, .. } => {
            let commits = fetch_commits(base, head)?;
            info!(
                base = base.as_str(),
                head = head.as_str(),
                count = commits.len(),
                "Checking merge request commits"
            );
            Ok(vec![branch, gate.validate_commit_records(&commits)])
        }
    }
}

/// The comment to post on a failing merge request. Pushes never get a comment.
pub fn comment_body(trigger: &TriggerContext, reports: &[ValidationReport]) -> Option<String> {
    if !matches!(trigger, TriggerContext::MergeRequest { .. }) {
        return None;
    }

    let sections: Vec<String> = reports.iter().filter_map(render_comment).collect();
    if sections.is_empty() {
        None
    } else {
        Some(sections.join("\n"))
    }
}

fn write_comment(path: &Path, comment: &str) -> Result<(), CliError> {
    fs::write(path, comment).map_err(|e| {
        warn!(path = ?path, error = e.to_string(), "Failed to write the comment body");
        CliError::IoError(format!("Failed to write the comment body to {:?}: {}", path, e))
    })?;

    info!(path = ?path, "Wrote the comment body");
    Ok(())
}

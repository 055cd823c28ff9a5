//! Detection of the CI event that started a validation run.
//!
//! GitLab CI and GitHub Actions are recognised from their predefined
//! environment variables.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::CliError;

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;

/// What triggered the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TriggerContext {
    /// A branch was pushed. Only the branch name is checked.
    Push { branch: String },

    /// A merge request was opened or updated. The branch name and the commits
    /// between `base` and `head` are checked.
    MergeRequest {
        source_branch: String,
        base: String,
        head: String,
    },
}

impl TriggerContext {
    /// The branch that has to follow the naming convention.
    pub fn branch(&self) -> &str {
        match self {
            TriggerContext::Push { branch } => branch,
            TriggerContext::MergeRequest { source_branch, .. } => source_branch,
        }
    }
}

/// Detects the trigger from the process environment.
pub fn detect_trigger_from_env() -> Result<TriggerContext, CliError> {
    detect_trigger(|name| std::env::var(name).ok())
}

/// Detects the trigger using `lookup` to read environment variables.
///
/// # Errors
///
/// Returns [`CliError::InvalidArguments`] if no supported CI system is found or
/// a variable the detected system should provide is missing.
pub fn detect_trigger<F>(lookup: F) -> Result<TriggerContext, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let trigger = if lookup("GITLAB_CI").is_some() || lookup("CI_PIPELINE_SOURCE").is_some() {
        debug!("Detected GitLab CI");
        detect_gitlab(&lookup)?
    } else if lookup("GITHUB_ACTIONS").is_some() || lookup("GITHUB_EVENT_NAME").is_some() {
        debug!("Detected GitHub Actions");
        detect_github(&lookup)?
    } else {
        return Err(CliError::InvalidArguments(
            "Could not detect a supported CI system (GitLab CI or GitHub Actions)".to_string(),
        ));
    };

    info!(trigger = ?trigger, "Detected trigger");
    Ok(trigger)
}

fn detect_gitlab<F>(lookup: &F) -> Result<TriggerContext, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("CI_PIPELINE_SOURCE").as_deref() == Some("merge_request_event") {
        return Ok(TriggerContext::MergeRequest {
            source_branch: required(lookup, "CI_MERGE_REQUEST_SOURCE_BRANCH_NAME")?,
            base: required(lookup, "CI_MERGE_REQUEST_DIFF_BASE_SHA")?,
            head: required(lookup, "CI_COMMIT_SHA")?,
        });
    }

    Ok(TriggerContext::Push {
        branch: required(lookup, "CI_COMMIT_REF_NAME")?,
    })
}

fn detect_github<F>(lookup: &F) -> Result<TriggerContext, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let event = lookup("GITHUB_EVENT_NAME").unwrap_or_default();
    if event == "pull_request" || event == "pull_request_target" {
        return Ok(TriggerContext::MergeRequest {
            source_branch: required(lookup, "GITHUB_HEAD_REF")?,
            base: format!("origin/{}", required(lookup, "GITHUB_BASE_REF")?),
            head: required(lookup, "GITHUB_SHA")?,
        });
    }

    Ok(TriggerContext::Push {
        branch: required(lookup, "GITHUB_REF_NAME")?,
    })
}

fn required<F>(lookup: &F, name: &str) -> Result<String, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            CliError::InvalidArguments(format!("Environment variable {} is not set", name))
        })
}

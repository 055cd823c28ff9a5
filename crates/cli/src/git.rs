use convention_gate_core::commits::CommitRecord;
use std::path::Path;
use std::process::{Command, Output};
use tracing::{debug, instrument};

use crate::errors::CliError;

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;

/// Field separator used in the `git log` format string (ASCII unit separator)
const FIELD_SEPARATOR: char = '\u{1f}';

/// Terminator written after every commit record
const RECORD_TERMINATOR: char = '\0';

/// Format string producing `<sha> US <parents> US <raw message> NUL` for every commit.
///
/// `%s` would join the whole first paragraph into one line, so the raw message
/// is requested and cut down to its first line by [`CommitRecord::from_message`].
const LOG_FORMAT: &str = "--format=%H%x1f%P%x1f%B%x00";

/// Captured output of a successful git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output, without the final line break
    pub stdout: String,

    /// Standard error, trimmed
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout)
                .trim_end_matches(&['\r', '\n'][..])
                .to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Runs git with the given arguments inside `repo`.
///
/// # Errors
///
/// Returns [`CliError::GitError`] if git cannot be started or exits with a non-zero status.
pub fn run_git(repo: &Path, args: &[&str]) -> Result<GitOutput, CliError> {
    debug!(repository = %repo.display(), args = ?args, "Running git");

    let output = Command::new("git")
        .current_dir(repo)
        .args(args)
        .output()
        .map_err(|e| {
            CliError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);
    if output.status.success() {
        return Ok(git_output);
    }

    let message = if git_output.stderr.is_empty() {
        git_output.stdout
    } else {
        git_output.stderr
    };
    Err(CliError::GitError(format!(
        "git {} failed (exit code {}): {}",
        args.first().unwrap_or(&""),
        output.status.code().unwrap_or(-1),
        message
    )))
}

/// Returns the name of the branch that is checked out in `repo`.
pub fn current_branch(repo: &Path) -> Result<String, CliError> {
    let output = run_git(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    let branch = output.stdout.trim().to_string();
    if branch == "HEAD" {
        return Err(CliError::InvalidArguments(
            "HEAD is detached. Pass the branch name explicitly.".to_string(),
        ));
    }

    Ok(branch)
}

/// Returns the commits reachable from `head` but not from `base`, newest first.
///
/// The whole range is retrieved before anything is returned, so callers never
/// validate a partial range.
#[instrument]
pub fn commit_range(repo: &Path, base: &str, head: &str) -> Result<Vec<CommitRecord>, CliError> {
    let range = format!("{}..{}", base, head);
    let output = run_git(repo, &["log", LOG_FORMAT, &range, "--"])?;

    let commits = parse_log(&output.stdout)?;
    debug!(range = range.as_str(), count = commits.len(), "Retrieved commit range");
    Ok(commits)
}

/// Parses the output of `git log` produced with [`LOG_FORMAT`].
pub fn parse_log(stdout: &str) -> Result<Vec<CommitRecord>, CliError> {
    stdout
        .split(RECORD_TERMINATOR)
        .map(|record| record.trim_start_matches('\n'))
        .filter(|record| !record.is_empty())
        .map(parse_log_record)
        .collect()
}

fn parse_log_record(record: &str) -> Result<CommitRecord, CliError> {
    let mut fields = record.splitn(3, FIELD_SEPARATOR);
    let (Some(sha), Some(parents), Some(message)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(CliError::GitError(format!(
            "unexpected git log record: {}",
            record
        )));
    };

    Ok(CommitRecord::from_message(Some(sha), message)
        .with_parent_count(parents.split_whitespace().count()))
}

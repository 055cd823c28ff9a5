use anyhow::Context;
use clap::Args;
use convention_gate_core::commits::CommitRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::{build_gate, GlobalOptions};
use crate::errors::CliError;
use crate::git;
use crate::output::{into_result, write_run, RunOutput};

#[cfg(test)]
#[path = "commits_tests.rs"]
mod tests;

/// Arguments for the commits command
///
/// Commits are taken from a git range (`--base` and `--head`), from a file with
/// one subject per line (`--file`). Standard input is only read for `--file -`.
#[derive(Args, Debug)]
pub struct CommitsArgs {
    /// Revision the range starts from (excluded)
    #[arg(long, requires = "head", conflicts_with = "file")]
    pub base: Option<String>,

    /// Revision the range ends at (included)
    #[arg(long, requires = "base")]
    pub head: Option<String>,

    /// File with one commit subject per line. Use `-` for standard input.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Repository the range is read from
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,
}

/// Executes the `commits` command.
#[instrument]
pub fn execute(args: CommitsArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let gate = build_gate(options)?;
    let commits = collect_commits(&args)?;
    info!(count = commits.len(), "Checking commit messages");

    let report = gate.validate_commit_records(&commits);
    let run = RunOutput::new(None, vec![&report]);
    write_run(&mut std::io::stdout().lock(), &run, options.format)?;
    into_result(&run)
}

fn collect_commits(args: &CommitsArgs) -> Result<Vec<CommitRecord>, CliError> {
    if let (Some(base), Some(head)) = (&args.base, &args.head) {
        return git::commit_range(&args.repo, base, head);
    }

    let Some(path) = &args.file else {
        return Err(CliError::InvalidArguments(
            "No commits to check. Pass --base and --head, or --file (`-` for standard input)."
                .to_string(),
        ));
    };

    let subjects = if path.as_path() == Path::new("-") {
        read_subjects(std::io::stdin().lock())
    } else {
        read_subjects_from_file(path)
    }
    .map_err(|e| CliError::IoError(format!("{:#}", e)))?;

    Ok(subjects.iter().map(|s| CommitRecord::new(s)).collect())
}

fn read_subjects_from_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open commit subjects file {:?}", path))?;
    read_subjects(BufReader::new(file))
        .with_context(|| format!("Failed to read commit subjects file {:?}", path))
}

/// Reads one commit subject per line.
fn read_subjects<R: BufRead>(reader: R) -> anyhow::Result<Vec<String>> {
    reader
        .lines()
        .map(|line| {
            line.map(|l| l.trim_end_matches('\r').to_string())
                .context("Failed to read a commit subject")
        })
        .collect()
}

use clap::Args;
use std::path::PathBuf;
use tracing::{info, instrument};

use super::{build_gate, GlobalOptions};
use crate::errors::CliError;
use crate::git;
use crate::output::{into_result, write_run, RunOutput};

/// Arguments for the branch command
#[derive(Args, Debug)]
pub struct BranchArgs {
    /// Branch name to check. Defaults to the branch that is checked out.
    pub name: Option<String>,

    /// Repository used to look up the checked out branch
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,
}

/// Executes the `branch` command.
#[instrument]
pub fn execute(args: BranchArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let gate = build_gate(options)?;

    let name = match args.name {
        Some(name) => name,
        None => git::current_branch(&args.repo)?,
    };
    info!(branch = name.as_str(), "Checking branch name");

    let report = gate.validate_branch(&name);
    let run = RunOutput::new(None, vec![&report]);
    write_run(&mut std::io::stdout().lock(), &run, options.format)?;
    into_result(&run)
}

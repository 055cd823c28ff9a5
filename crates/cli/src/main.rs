//! # Convention Gate CLI
//!
//! Command-line gate that validates branch names and commit messages against
//! the repository conventions.
//!
//! The process exits with status 0 when every check passes and with status 1
//! when a branch name or commit message does not follow the conventions, so it
//! can be used directly as a CI job.
//!
//! # Commands
//!
//! - `branch` - Validate a branch name
//! - `commits` - Validate the commit messages of a range or a file (`-` for standard input)
//! - `ci` - Detect the CI event and run the checks that apply to it
//! - `config` - Manage the configuration file
//!
//! # Examples
//!
//! ```bash
//! # Check the branch that is checked out
//! convention-gate branch
//!
//! # Check the commits of a merge request
//! convention-gate commits --base origin/main --head HEAD
//!
//! # Run inside a GitLab or GitHub pipeline
//! convention-gate ci --comment-file comment.md
//! ```

#![deny(missing_docs)]

use clap::{Parser, Subcommand};
use std::process::{ExitCode, Termination};
use tracing::{debug, error, instrument};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Command implementations for the CLI.
mod commands;

/// Configuration file handling for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

/// Access to the git repository.
mod git;

/// Report output formats.
mod output;

/// Detection of the CI event that started the run.
mod trigger;

use commands::{
    branch::BranchArgs, ci::CiArgs, commits::CommitsArgs, config_cmd::ConfigCommands,
    GlobalOptions,
};
use errors::CliError;
use output::OutputFormat;

/// Environment variable holding the log filter
const LOG_ENV_VAR: &str = "CONVENTION_GATE_LOG";

/// Command-line interface structure for Convention Gate.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Alternate config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format for reports
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for the Convention Gate CLI.
#[derive(Subcommand)]
enum Commands {
    /// Validate a branch name
    Branch(BranchArgs),

    /// Validate commit messages
    Commits(CommitsArgs),

    /// Detect the CI event and validate the branch and commits it covers
    Ci(CiArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Initializes logging to standard error.
///
/// The filter is read from `CONVENTION_GATE_LOG`. Without it only warnings are
/// shown, or debug output when `verbose` is set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Dispatches to the command handler.
#[instrument(skip(cli))]
fn run(cli: Cli) -> Result<(), CliError> {
    let options = GlobalOptions {
        config: cli.config,
        format: cli.format,
    };

    match cli.command {
        Commands::Branch(args) => commands::branch::execute(args, &options),
        Commands::Commits(args) => commands::commits::execute(args, &options),
        Commands::Ci(args) => commands::ci::execute(args, &options),
        Commands::Config(cmd) => commands::config_cmd::execute(cmd),
    }
}

/// Main entry point for the Convention Gate CLI.
///
/// The exit status is derived from the outcome of the command, see
/// [`CliError`] for the mapping.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match &e {
                CliError::ValidationFailed(_) => eprintln!("{}", e),
                other => error!("{}", other),
            }
            e.report()
        }
    }
}

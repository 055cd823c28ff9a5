use clap::Subcommand;
use convention_gate_core::config::{load_convention_config, ConventionConfig};
use convention_gate_core::rules::RuleSet;
use std::path::Path;
use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, load_config, save_config};
use crate::errors::CliError;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create an initial configuration file containing the built-in conventions
    Init {
        /// Path to save the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check configuration syntax and rule patterns
    Validate {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Show the configuration that validation would use
    Show {
        /// Path to the configuration file
        #[arg(short, long)]
        path: Option<String>,
    },
}

/// Execute the config command
#[instrument]
pub fn execute(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Init { path } => {
            let config_path = get_config_path(path.as_deref());
            init_config(&config_path)?;
            println!("Configuration initialized at {:?}", config_path);
            Ok(())
        }
        ConfigCommands::Validate { path } => {
            validate_config(&get_config_path(path.as_deref()))?;
            println!("Configuration is valid");
            Ok(())
        }
        ConfigCommands::Show { path } => {
            print!("{}", show_config(&get_config_path(path.as_deref()))?);
            Ok(())
        }
    }
}

/// The configuration written by `config init`: the defaults with both catalogs spelled out.
pub fn initial_config() -> ConventionConfig {
    let mut config = ConventionConfig::default();
    config.branches.rules = Some(RuleSet::default_branch_rules().definitions());
    config.commits.rules = Some(RuleSet::default_commit_rules().definitions());
    config
}

/// Initialize a new configuration file
#[instrument]
fn init_config(config_path: &Path) -> Result<(), CliError> {
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = CliError::ConfigError(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    save_config(&initial_config(), config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    Ok(())
}

/// Validate a configuration file. Unlike validation runs, a missing file is an error here.
#[instrument]
fn validate_config(config_path: &Path) -> Result<(), CliError> {
    debug!(message = "Validating configuration", path = ?config_path);

    match load_convention_config(config_path) {
        Ok(_) => {
            info!(message = "Configuration is valid", path = ?config_path);
            Ok(())
        }
        Err(e) => {
            error!(
                message = "Configuration is invalid",
                path = ?config_path,
                error = ?e
            );
            Err(CliError::ConfigError(format!(
                "The configuration is invalid: {}",
                e
            )))
        }
    }
}

/// Render the effective configuration as TOML
#[instrument]
fn show_config(config_path: &Path) -> Result<String, CliError> {
    let config = load_config(config_path)?;
    toml::to_string_pretty(&config)
        .map_err(|e| CliError::ConfigError(format!("Failed to serialize configuration: {}", e)))
}

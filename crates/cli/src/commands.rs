use convention_gate_core::ConventionGate;

use crate::config::{get_config_path, load_config};
use crate::errors::CliError;
use crate::output::OutputFormat;

/// Branch name validation
pub mod branch;
/// CI entry point that detects the trigger and runs the matching checks
pub mod ci;
/// Commit message validation
pub mod commits;
/// Configuration management commands
pub mod config_cmd;

/// Options shared by all validation commands
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Alternate config file
    pub config: Option<String>,

    /// Output format for reports
    pub format: OutputFormat,
}

/// Builds the validation engine from the configuration file, or the built-in
/// conventions if there is no configuration file.
fn build_gate(options: &GlobalOptions) -> Result<ConventionGate, CliError> {
    let config_path = get_config_path(options.config.as_deref());
    let config = load_config(&config_path)?;
    ConventionGate::from_config(&config)
        .map_err(|e| CliError::ConfigError(format!("Failed to build the rule catalogs: {}", e)))
}

use std::fs;
use std::path::{Path, PathBuf};

use convention_gate_core::config::{load_convention_config, ConventionConfig};
use convention_gate_core::errors::ConfigLoadError;
use tracing::{debug, info, warn};

use crate::errors::CliError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = ".convention-gate.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Get the path to the configuration file
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

/// Loads the configuration, using the built-in defaults if the file does not exist.
///
/// A file that exists but cannot be read, parsed or compiled is an error.
pub fn load_config(path: &Path) -> Result<ConventionConfig, CliError> {
    debug!("Loading configuration from {:?}", path);

    match load_convention_config(path) {
        Ok(config) => {
            info!("Loaded configuration from {:?}", path);
            Ok(config)
        }
        Err(ConfigLoadError::NotFound(_)) => {
            warn!(
                "No configuration file at {:?}. Using the built-in conventions.",
                path
            );
            Ok(ConventionConfig::default())
        }
        Err(e) => Err(CliError::ConfigError(format!(
            "Failed to load configuration from {:?}: {}",
            path, e
        ))),
    }
}

/// Save configuration to the specified file
pub fn save_config(config: &ConventionConfig, path: &Path) -> Result<(), CliError> {
    debug!("Saving configuration to {:?}", path);

    let content = toml::to_string_pretty(config)
        .map_err(|e| CliError::ConfigError(format!("Failed to serialize configuration: {}", e)))?;

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CliError::ConfigError(format!("Failed to create directory: {}", e)))?;
    }

    fs::write(path, content).map_err(|e| {
        CliError::ConfigError(format!("Failed to write configuration file: {}", e))
    })?;

    info!("Configuration saved to {:?}", path);
    Ok(())
}

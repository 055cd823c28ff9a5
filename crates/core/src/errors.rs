use thiserror::Error;

use crate::rules::RuleKind;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while building the rule catalogs.
///
/// Malformed candidates never produce an error; they are reported as invalid
/// verdicts. The only fault the engine knows about is a rule set that cannot be
/// constructed, which prevents any validation from running.
#[derive(Error, Debug)]
pub enum ConventionError {
    #[error("Rule '{label}' has an invalid pattern: {source}")]
    InvalidRulePattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("A {0} rule set must contain at least one rule")]
    EmptyRuleSet(RuleKind),

    #[error("Rule '{label}' is a {actual} rule and cannot be added to a {expected} rule set")]
    RuleKindMismatch {
        label: String,
        expected: RuleKind,
        actual: RuleKind,
    },
}

/// Errors raised while loading the convention configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unsupported configuration schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    #[error("Invalid rule catalog in configuration: {0}")]
    InvalidRules(#[from] ConventionError),
}

//! Configuration settings for the convention gate.
//!
//! This module centralizes the built-in catalogs, limits and markers, together
//! with the TOML configuration file that can override them.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::commits::{MergeDetector, ParentCountDetector, SubjectPrefixDetector};
use crate::errors::{ConfigLoadError, ConventionError};
use crate::rules::{RuleDefinition, RuleKind, RuleSet};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Built-in branch catalog as `(pattern, label)` pairs, in evaluation order
pub const BRANCH_RULE_CATALOG: [(&str, &str); 8] = [
    ("feature/[a-z0-9-]+", "feature"),
    ("bugfix/[a-z0-9-]+", "bugfix"),
    ("hotfix/[a-z0-9-]+", "hotfix"),
    (r"release/[0-9]+\.[0-9]+\.[0-9]+", "release (semantic version)"),
    ("chore/[a-z0-9-]+", "chore"),
    ("docs/[a-z0-9-]+", "docs"),
    ("test/[a-z0-9-]+", "test"),
    ("refactor/[a-z0-9-]+", "refactor"),
];

/// HTML comment marker for branch name validation comments
pub const BRANCH_COMMENT_MARKER: &str = "<!-- CONVENTION_GATE_BRANCH -->";

/// HTML comment marker for commit message validation comments
pub const COMMITS_COMMENT_MARKER: &str = "<!-- CONVENTION_GATE_COMMITS -->";

/// Valid commit types for conventional commits
pub const COMMIT_TYPES: [&str; 11] = [
    "feat", "fix", "docs", "style", "refactor", "test", "chore", "perf", "ci", "build", "revert",
];

/// Maximum number of characters in a commit description
pub const MAX_DESCRIPTION_LENGTH: usize = 50;

/// Subject prefix that identifies a merge commit
pub const MERGE_COMMIT_PREFIX: &str = "Merge";

/// The only configuration schema version this crate understands
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Top-level configuration for the convention gate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConventionConfig {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,

    #[serde(default)]
    pub branches: BranchPolicyConfig,

    #[serde(default)]
    pub commits: CommitPolicyConfig,
}

impl ConventionConfig {
    /// Compiles the branch catalog, falling back to the built-in rules.
    pub fn branch_rules(&self) -> Result<RuleSet, ConventionError> {
        match &self.branches.rules {
            Some(definitions) => RuleSet::from_definitions(RuleKind::Branch, definitions),
            None => Ok(RuleSet::default_branch_rules()),
        }
    }

    /// Compiles the commit catalog, falling back to the built-in rules.
    pub fn commit_rules(&self) -> Result<RuleSet, ConventionError> {
        match &self.commits.rules {
            Some(definitions) => RuleSet::from_definitions(RuleKind::Commit, definitions),
            None => Ok(RuleSet::default_commit_rules()),
        }
    }

    /// Builds the merge commit detector selected by the configuration.
    pub fn merge_detector(&self) -> Box<dyn MergeDetector> {
        let prefix = SubjectPrefixDetector::new(&self.commits.merge_prefix);
        match self.commits.merge_detection {
            MergeDetection::SubjectPrefix => Box::new(prefix),
            MergeDetection::ParentCount => Box::new(ParentCountDetector::new(prefix)),
        }
    }
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            branches: BranchPolicyConfig::default(),
            commits: CommitPolicyConfig::default(),
        }
    }
}

/// Branch name policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchPolicyConfig {
    /// Whether branch names are validated at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Replacement catalog. The built-in catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleDefinition>>,
}

impl Default for BranchPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            rules: None,
        }
    }
}

/// Commit message policy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommitPolicyConfig {
    /// Whether commit subjects are validated at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// How merge commits are recognised
    #[serde(default)]
    pub merge_detection: MergeDetection,

    /// Subject prefix used by the subject prefix heuristic
    #[serde(default = "CommitPolicyConfig::default_merge_prefix")]
    pub merge_prefix: String,

    /// Replacement catalog. The built-in catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<RuleDefinition>>,
}

impl CommitPolicyConfig {
    fn default_merge_prefix() -> String {
        MERGE_COMMIT_PREFIX.to_string()
    }
}

impl Default for CommitPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            merge_detection: MergeDetection::default(),
            merge_prefix: Self::default_merge_prefix(),
            rules: None,
        }
    }
}

/// Strategy used to recognise merge commits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MergeDetection {
    /// The subject starts with the merge prefix
    #[default]
    SubjectPrefix,

    /// The commit has two or more parents
    ParentCount,
}

fn default_enabled() -> bool {
    true
}

/// Loads the convention configuration from the given path.
///
/// The rule catalogs are compiled as part of loading, so a configuration that
/// loads successfully can always be turned into rule sets.
///
/// # Arguments
/// * `path` - Path to the configuration file
///
/// # Returns
/// * `Ok(ConventionConfig)` if loaded and valid
/// * `Err(ConfigLoadError)` if there is a problem
pub fn load_convention_config<P: AsRef<Path>>(path: P) -> Result<ConventionConfig, ConfigLoadError> {
    let path_ref = path.as_ref();
    let content = match fs::read_to_string(path_ref) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigLoadError::NotFound(path_ref.display().to_string()));
        }
        Err(e) => return Err(ConfigLoadError::Io(e)),
    };

    parse_convention_config(&content)
}

/// Parses and checks the content of a configuration file.
pub fn parse_convention_config(content: &str) -> Result<ConventionConfig, ConfigLoadError> {
    let config: ConventionConfig = toml::from_str(content)?;
    if config.schema_version != SUPPORTED_SCHEMA_VERSION {
        return Err(ConfigLoadError::UnsupportedSchemaVersion(
            config.schema_version,
        ));
    }

    config.branch_rules()?;
    config.commit_rules()?;

    Ok(config)
}

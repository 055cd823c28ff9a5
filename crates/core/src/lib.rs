//! # Convention Gate Core
//!
//! Validation engine for repository naming and commit message conventions.
//!
//! Convention Gate rejects changes whose branch name or commit history does not
//! follow the agreed taxonomy:
//! - branch names must use one of the typed prefixes (`feature/`, `bugfix/`, ...)
//! - commit subjects must follow the `type(scope): description` format
//! - merge commits are exempt from the commit check
//!
//! The engine is synchronous and free of side effects. Fetching commits,
//! detecting what triggered the run and posting feedback are left to the caller.
//!
//! ## Example Usage
//!
//! ```rust
//! use convention_gate_core::ConventionGate;
//! use convention_gate_core::render::render_summary;
//!
//! let gate = ConventionGate::new();
//!
//! let branch = gate.validate_branch("feature/add-login");
//! assert!(branch.passed);
//!
//! let commits = gate.validate_commits(&["feat: add login", "wip"]);
//! assert!(!commits.passed);
//! println!("{}", render_summary(&commits));
//! ```

pub mod branch;
pub mod commits;
pub mod config;
pub mod errors;
pub mod matcher;
pub mod render;
pub mod report;
pub mod rules;

use branch::BranchValidator;
use commits::{CommitRangeValidator, CommitRecord};
use config::ConventionConfig;
use errors::ConventionError;
use report::ValidationReport;
use rules::RuleKind;
use tracing::{debug, instrument};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Entry point for validating branch names and commit ranges.
///
/// The rule sets are built once and never change, so a single instance can be
/// shared between any number of validation runs.
#[derive(Debug)]
pub struct ConventionGate {
    branches: Option<BranchValidator>,
    commits: Option<CommitRangeValidator>,
}

impl ConventionGate {
    /// Creates a gate with the built-in catalogs and the `Merge` subject heuristic.
    pub fn new() -> Self {
        Self {
            branches: Some(BranchValidator::default()),
            commits: Some(CommitRangeValidator::default()),
        }
    }

    /// Creates a gate from explicit validators. A `None` validator disables that check.
    pub fn with_validators(
        branches: Option<BranchValidator>,
        commits: Option<CommitRangeValidator>,
    ) -> Self {
        Self { branches, commits }
    }

    /// Creates a gate from a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConventionError`] if one of the configured catalogs cannot be compiled.
    pub fn from_config(config: &ConventionConfig) -> Result<Self, ConventionError> {
        let branches = if config.branches.enabled {
            Some(BranchValidator::new(config.branch_rules()?))
        } else {
            debug!("Branch name validation is disabled");
            None
        };

        let commits = if config.commits.enabled {
            Some(CommitRangeValidator::with_detector(
                config.commit_rules()?,
                config.merge_detector(),
            ))
        } else {
            debug!("Commit message validation is disabled");
            None
        };

        Ok(Self { branches, commits })
    }

    /// Validates a branch name. Returns an empty passing report if the check is disabled.
    #[instrument(skip(self))]
    pub fn validate_branch(&self, name: &str) -> ValidationReport {
        match &self.branches {
            Some(validator) => validator.validate(name),
            None => ValidationReport::disabled(RuleKind::Branch),
        }
    }

    /// Validates commit messages. Only the first line of each message is used.
    pub fn validate_commits<S: AsRef<str>>(&self, messages: &[S]) -> ValidationReport {
        match &self.commits {
            Some(validator) => validator.validate_subjects(messages),
            None => ValidationReport::disabled(RuleKind::Commit),
        }
    }

    /// Validates commit records supplied by a version control collaborator.
    pub fn validate_commit_records(&self, commits: &[CommitRecord]) -> ValidationReport {
        match &self.commits {
            Some(validator) => validator.validate(commits),
            None => ValidationReport::disabled(RuleKind::Commit),
        }
    }
}

impl Default for ConventionGate {
    fn default() -> Self {
        Self::new()
    }
}

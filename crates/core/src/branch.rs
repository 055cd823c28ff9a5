//! # Branch Name Validation
//!
//! Validates a single branch name against the branch rule set. Branch names are
//! never skipped, so a report always has a `total` of one.
//!
//! The built-in patterns only allow lowercase letters, digits and hyphens after
//! the prefix. Branch names with uppercase letters, underscores or spaces are
//! therefore always rejected.

use tracing::{info, instrument};

use crate::matcher::classify;
use crate::report::ValidationReport;
use crate::rules::RuleSet;

#[cfg(test)]
#[path = "branch_tests.rs"]
mod tests;

/// Validates branch names against a branch rule set.
#[derive(Debug, Clone)]
pub struct BranchValidator {
    rules: RuleSet,
}

impl BranchValidator {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validates one branch name.
    #[instrument(skip(self))]
    pub fn validate(&self, name: &str) -> ValidationReport {
        let verdict = classify(name, &self.rules);
        info!(
            branch = name,
            valid = verdict.valid,
            rule = verdict.matched_rule.as_ref().map(|r| r.label.as_str()),
            "Validated branch name"
        );

        ValidationReport::from_verdicts(
            self.rules.kind(),
            vec![verdict],
            self.rules.definitions(),
        )
    }
}

impl Default for BranchValidator {
    fn default() -> Self {
        Self::new(RuleSet::default_branch_rules())
    }
}

/// Validates a branch name with the built-in branch rules.
///
/// # Examples
///
/// ```
/// use convention_gate_core::branch::validate_branch;
///
/// assert!(validate_branch("release/1.2.3").passed);
/// assert!(!validate_branch("release/v1.2.3").passed);
/// assert!(!validate_branch("feature/Login").passed);
/// ```
pub fn validate_branch(name: &str) -> ValidationReport {
    BranchValidator::default().validate(name)
}

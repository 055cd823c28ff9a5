//! # Validation Report
//!
//! Aggregated outcome of one validation run. A report is built from the ordered
//! verdicts of the run and is never modified afterwards.

use serde::Serialize;

use crate::matcher::{InvalidReason, Verdict};
use crate::rules::{RuleDefinition, RuleKind};

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;

/// A candidate that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidItem {
    /// The candidate, verbatim
    pub candidate: String,

    pub reason: InvalidReason,

    /// Short human readable explanation
    pub reason_hint: String,
}

/// Pass/fail outcome for a set of candidates.
///
/// # Examples
///
/// ```
/// use convention_gate_core::commits::validate_commits;
///
/// let report = validate_commits(&["feat: a", "bad commit", "Merge branch x", "fix: b"]);
///
/// assert_eq!(report.total, 3);
/// assert!(!report.passed);
/// assert_eq!(report.invalid_items.len(), 1);
/// assert_eq!(report.invalid_items[0].candidate, "bad commit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// What kind of candidates were validated
    pub kind: RuleKind,

    /// Number of candidates that were classified (skipped ones excluded)
    pub total: usize,

    /// Violations, in input order
    pub invalid_items: Vec<InvalidItem>,

    /// `true` iff there are no violations
    pub passed: bool,

    /// Every verdict of the run in input order, skipped ones included
    pub verdicts: Vec<Verdict>,

    /// The catalog the candidates were checked against
    pub expected: Vec<RuleDefinition>,
}

impl ValidationReport {
    /// Builds a report from the verdicts of a run.
    ///
    /// `total` counts the verdicts that are not skipped and every violation is
    /// listed exactly once, in the order of `verdicts`.
    pub fn from_verdicts(
        kind: RuleKind,
        verdicts: Vec<Verdict>,
        expected: Vec<RuleDefinition>,
    ) -> Self {
        let total = verdicts.iter().filter(|v| !v.skipped).count();
        let invalid_items: Vec<InvalidItem> = verdicts
            .iter()
            .filter(|v| v.is_violation())
            .map(|v| {
                let reason = v.reason.unwrap_or(InvalidReason::PatternMismatch);
                InvalidItem {
                    candidate: v.candidate.clone(),
                    reason,
                    reason_hint: reason_hint(kind, reason),
                }
            })
            .collect();
        let passed = invalid_items.is_empty();

        Self {
            kind,
            total,
            invalid_items,
            passed,
            verdicts,
            expected,
        }
    }

    /// A passing report for a check that is switched off.
    pub fn disabled(kind: RuleKind) -> Self {
        Self::from_verdicts(kind, Vec::new(), Vec::new())
    }

    /// Number of candidates that were excluded from classification.
    pub fn skipped(&self) -> usize {
        self.verdicts.iter().filter(|v| v.skipped).count()
    }
}

fn reason_hint(kind: RuleKind, reason: InvalidReason) -> String {
    match (kind, reason) {
        (RuleKind::Branch, InvalidReason::EmptyCandidate) => "branch name is empty".to_string(),
        (RuleKind::Commit, InvalidReason::EmptyCandidate) => {
            "commit subject is empty".to_string()
        }
        (RuleKind::Branch, InvalidReason::PatternMismatch) => {
            "branch name does not match any allowed pattern".to_string()
        }
        (RuleKind::Commit, InvalidReason::PatternMismatch) => {
            "commit subject does not match any allowed pattern".to_string()
        }
    }
}

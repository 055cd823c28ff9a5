//! # Matcher
//!
//! Classifies a single candidate against a [`RuleSet`]. Rules are applied in
//! catalog order and the first rule that matches wins. There is no scoring and
//! no best-match heuristic, so a verdict is a pure function of the rule set and
//! the candidate.

use serde::Serialize;
use std::fmt;
use tracing::trace;

use crate::rules::{Rule, RuleSet};

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidReason {
    /// The candidate is empty or only whitespace
    EmptyCandidate,

    /// No rule in the catalog matched the candidate
    PatternMismatch,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::EmptyCandidate => write!(f, "empty candidate"),
            InvalidReason::PatternMismatch => write!(f, "pattern mismatch"),
        }
    }
}

/// Classification result for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// The classified string, verbatim
    pub candidate: String,

    /// Whether a rule matched. Always `false` for skipped candidates.
    pub valid: bool,

    /// The rule that matched, if any
    pub matched_rule: Option<Rule>,

    /// Whether the candidate was excluded from classification
    pub skipped: bool,

    /// Set for invalid, non-skipped candidates only
    pub reason: Option<InvalidReason>,
}

impl Verdict {
    /// A verdict for a candidate that was excluded from classification.
    pub fn skipped(candidate: &str) -> Self {
        Self {
            candidate: candidate.to_string(),
            valid: false,
            matched_rule: None,
            skipped: true,
            reason: None,
        }
    }

    /// Returns `true` if the verdict counts as a violation.
    pub fn is_violation(&self) -> bool {
        !self.skipped && !self.valid
    }
}

/// Classifies a candidate with the given rule set.
///
/// Blank candidates go through the same scan as any other candidate. No
/// catalog rule is expected to accept them, and when none does the verdict
/// carries [`InvalidReason::EmptyCandidate`].
///
/// # Examples
///
/// ```
/// use convention_gate_core::matcher::classify;
/// use convention_gate_core::rules::RuleSet;
///
/// let rules = RuleSet::default_branch_rules();
///
/// let verdict = classify("hotfix/broken-login", &rules);
/// assert!(verdict.valid);
/// assert_eq!(verdict.matched_rule.unwrap().label, "hotfix");
///
/// let verdict = classify("Hotfix/broken-login", &rules);
/// assert!(!verdict.valid);
/// assert!(verdict.matched_rule.is_none());
/// ```
pub fn classify(candidate: &str, rules: &RuleSet) -> Verdict {
    let matched_rule = rules.rules().iter().find(|rule| rule.is_match(candidate));

    match matched_rule {
        Some(rule) => {
            trace!(
                candidate = candidate,
                kind = %rules.kind(),
                rule = rule.label.as_str(),
                "Candidate matched rule"
            );
            Verdict {
                candidate: candidate.to_string(),
                valid: true,
                matched_rule: Some(rule.clone()),
                skipped: false,
                reason: None,
            }
        }
        None => {
            let reason = if candidate.trim().is_empty() {
                InvalidReason::EmptyCandidate
            } else {
                InvalidReason::PatternMismatch
            };
            trace!(
                candidate = candidate,
                kind = %rules.kind(),
                reason = %reason,
                "Candidate did not match any rule"
            );
            Verdict {
                candidate: candidate.to_string(),
                valid: false,
                matched_rule: None,
                skipped: false,
                reason: Some(reason),
            }
        }
    }
}

//! # Commit Range Validation
//!
//! Validates the subject lines of an ordered list of commits. Merge commits are
//! recognised by a [`MergeDetector`] and skipped; every other commit subject is
//! classified with the commit rule set. The range passes only if every
//! classified subject is valid.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, instrument};

use crate::config::MERGE_COMMIT_PREFIX;
use crate::matcher::{classify, Verdict};
use crate::report::ValidationReport;
use crate::rules::RuleSet;

#[cfg(test)]
#[path = "commits_tests.rs"]
mod tests;

/// A commit as supplied by the version control collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit hash, if known
    pub sha: Option<String>,

    /// First line of the commit message
    pub subject: String,

    /// Number of parent commits, if known
    pub parent_count: Option<usize>,
}

impl CommitRecord {
    /// A record that only knows its subject line.
    pub fn new(subject: &str) -> Self {
        Self {
            sha: None,
            subject: subject_line(subject).to_string(),
            parent_count: None,
        }
    }

    /// Builds a record from a full commit message. The body is discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use convention_gate_core::commits::CommitRecord;
    ///
    /// let record = CommitRecord::from_message(
    ///     Some("8c3f1e2"),
    ///     "fix(auth): token refresh\n\nThe refresh token was never rotated.",
    /// );
    /// assert_eq!(record.subject, "fix(auth): token refresh");
    /// ```
    pub fn from_message(sha: Option<&str>, message: &str) -> Self {
        Self {
            sha: sha.map(str::to_string),
            subject: subject_line(message).to_string(),
            parent_count: None,
        }
    }

    pub fn with_parent_count(mut self, parent_count: usize) -> Self {
        self.parent_count = Some(parent_count);
        self
    }
}

/// Returns the first line of a commit message, without a trailing carriage return.
pub fn subject_line(message: &str) -> &str {
    let line = message.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

/// Decides whether a commit is a merge commit that should be skipped.
pub trait MergeDetector: fmt::Debug + Send + Sync {
    fn is_merge(&self, commit: &CommitRecord) -> bool;
}

/// Treats every commit whose subject starts with a fixed prefix as a merge commit.
///
/// The match is case sensitive and only looks at the start of the subject, so a
/// regular commit whose subject happens to start with the prefix is skipped too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPrefixDetector {
    prefix: String,
}

impl SubjectPrefixDetector {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl Default for SubjectPrefixDetector {
    fn default() -> Self {
        Self::new(MERGE_COMMIT_PREFIX)
    }
}

impl MergeDetector for SubjectPrefixDetector {
    fn is_merge(&self, commit: &CommitRecord) -> bool {
        commit.subject.starts_with(&self.prefix)
    }
}

/// Treats commits with two or more parents as merge commits.
///
/// Records without parent information are handed to the fallback detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentCountDetector {
    fallback: SubjectPrefixDetector,
}

impl ParentCountDetector {
    pub fn new(fallback: SubjectPrefixDetector) -> Self {
        Self { fallback }
    }
}

impl Default for ParentCountDetector {
    fn default() -> Self {
        Self::new(SubjectPrefixDetector::default())
    }
}

impl MergeDetector for ParentCountDetector {
    fn is_merge(&self, commit: &CommitRecord) -> bool {
        match commit.parent_count {
            Some(count) => count >= 2,
            None => self.fallback.is_merge(commit),
        }
    }
}

/// Validates commit ranges against a commit rule set.
#[derive(Debug)]
pub struct CommitRangeValidator {
    rules: RuleSet,
    detector: Box<dyn MergeDetector>,
}

impl CommitRangeValidator {
    /// Creates a validator that skips merge commits by subject prefix.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_detector(rules, Box::new(SubjectPrefixDetector::default()))
    }

    pub fn with_detector(rules: RuleSet, detector: Box<dyn MergeDetector>) -> Self {
        Self { rules, detector }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validates an ordered list of commits.
    ///
    /// Each commit produces exactly one verdict, in input order. Merge commits get
    /// a skipped verdict and count neither towards `total` nor as a violation.
    #[instrument(skip(self, commits), fields(commits = commits.len()))]
    pub fn validate(&self, commits: &[CommitRecord]) -> ValidationReport {
        let verdicts: Vec<Verdict> = commits
            .iter()
            .map(|commit| {
                if self.detector.is_merge(commit) {
                    debug!(
                        sha = commit.sha.as_deref().unwrap_or_default(),
                        subject = commit.subject.as_str(),
                        "Skipping merge commit"
                    );
                    Verdict::skipped(&commit.subject)
                } else {
                    let verdict = classify(&commit.subject, &self.rules);
                    debug!(
                        sha = commit.sha.as_deref().unwrap_or_default(),
                        subject = commit.subject.as_str(),
                        valid = verdict.valid,
                        "Checked commit subject"
                    );
                    verdict
                }
            })
            .collect();

        let report =
            ValidationReport::from_verdicts(self.rules.kind(), verdicts, self.rules.definitions());
        info!(
            total = report.total,
            skipped = report.skipped(),
            invalid = report.invalid_items.len(),
            passed = report.passed,
            "Validated commit range"
        );
        report
    }

    /// Validates commit messages given as plain strings. Only the first line of
    /// each message is used.
    pub fn validate_subjects<S: AsRef<str>>(&self, messages: &[S]) -> ValidationReport {
        let commits: Vec<CommitRecord> = messages
            .iter()
            .map(|m| CommitRecord::new(m.as_ref()))
            .collect();
        self.validate(&commits)
    }
}

impl Default for CommitRangeValidator {
    fn default() -> Self {
        Self::new(RuleSet::default_commit_rules())
    }
}

/// Validates commit subjects with the built-in commit rules, skipping subjects
/// that start with `Merge`.
pub fn validate_commits<S: AsRef<str>>(subjects: &[S]) -> ValidationReport {
    CommitRangeValidator::default().validate_subjects(subjects)
}

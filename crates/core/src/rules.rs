//! # Rule Catalogs
//!
//! Rules are plain data: a compiled pattern plus the label of the category it
//! stands for. A [`RuleSet`] is an ordered catalog of rules of one kind. The order
//! of the rules matters because the first matching rule wins.
//!
//! Patterns are written without anchors. The anchors are added when a rule is
//! constructed, based on its [`RuleKind`]:
//! - branch rules must match the whole branch name,
//! - commit rules must match from the start of the subject line.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{BRANCH_RULE_CATALOG, COMMIT_TYPES, MAX_DESCRIPTION_LENGTH};
use crate::errors::ConventionError;

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;

lazy_static! {
    static ref DEFAULT_BRANCH_RULES: RuleSet = RuleSet::from_catalog(
        RuleKind::Branch,
        BRANCH_RULE_CATALOG
            .iter()
            .map(|(pattern, label)| RuleDefinition::new(pattern, label)),
    )
    .expect("Failed to compile the built-in branch rules");

    static ref DEFAULT_COMMIT_RULES: RuleSet = RuleSet::from_catalog(
        RuleKind::Commit,
        [RuleDefinition::new(
            &default_commit_pattern(),
            "conventional commit",
        )],
    )
    .expect("Failed to compile the built-in commit rules");
}

/// The kind of candidate a rule classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Classifies a branch name. Anchored at both ends.
    Branch,

    /// Classifies the subject line of a commit message. Anchored at the start only.
    Commit,
}

impl RuleKind {
    /// Wraps an unanchored pattern in the anchors this kind requires.
    fn anchor(&self, pattern: &str) -> String {
        match self {
            RuleKind::Branch => format!("^(?:{})$", pattern),
            RuleKind::Commit => format!("^(?:{})", pattern),
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Branch => write!(f, "branch"),
            RuleKind::Commit => write!(f, "commit"),
        }
    }
}

/// Serializable description of a rule, as found in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Unanchored regular expression
    pub pattern: String,

    /// Name of the category the pattern stands for
    pub label: String,
}

impl RuleDefinition {
    pub fn new(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
        }
    }
}

/// A single compiled rule.
///
/// # Examples
///
/// ```
/// use convention_gate_core::rules::{Rule, RuleKind};
///
/// let rule = Rule::new(RuleKind::Branch, "feature/[a-z0-9-]+", "feature").unwrap();
/// assert!(rule.is_match("feature/login-page"));
/// assert!(!rule.is_match("feature/login-page/extra"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// What kind of candidate the rule classifies
    pub kind: RuleKind,

    /// The unanchored pattern as it was defined
    pub pattern: String,

    /// Name of the category
    pub label: String,

    #[serde(skip)]
    regex: Regex,
}

impl Rule {
    /// Compiles a rule, anchoring the pattern according to `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ConventionError::InvalidRulePattern`] if the pattern does not compile.
    pub fn new(kind: RuleKind, pattern: &str, label: &str) -> Result<Self, ConventionError> {
        let regex = Regex::new(&kind.anchor(pattern)).map_err(|source| {
            ConventionError::InvalidRulePattern {
                label: label.to_string(),
                source,
            }
        })?;

        Ok(Self {
            kind,
            pattern: pattern.to_string(),
            label: label.to_string(),
            regex,
        })
    }

    /// Returns `true` if the candidate satisfies this rule.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.pattern == other.pattern && self.label == other.label
    }
}

impl Eq for Rule {}

/// An ordered, immutable catalog of rules of a single kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    kind: RuleKind,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a rule set from already compiled rules.
    ///
    /// # Errors
    ///
    /// - [`ConventionError::EmptyRuleSet`] if `rules` is empty
    /// - [`ConventionError::RuleKindMismatch`] if a rule is of a different kind than the set
    pub fn new(kind: RuleKind, rules: Vec<Rule>) -> Result<Self, ConventionError> {
        if rules.is_empty() {
            return Err(ConventionError::EmptyRuleSet(kind));
        }

        if let Some(rule) = rules.iter().find(|r| r.kind != kind) {
            return Err(ConventionError::RuleKindMismatch {
                label: rule.label.clone(),
                expected: kind,
                actual: rule.kind,
            });
        }

        Ok(Self { kind, rules })
    }

    /// Compiles a rule set from rule definitions, keeping their order.
    pub fn from_definitions(
        kind: RuleKind,
        definitions: &[RuleDefinition],
    ) -> Result<Self, ConventionError> {
        Self::from_catalog(kind, definitions.iter().cloned())
    }

    fn from_catalog<I>(kind: RuleKind, definitions: I) -> Result<Self, ConventionError>
    where
        I: IntoIterator<Item = RuleDefinition>,
    {
        let rules = definitions
            .into_iter()
            .map(|d| Rule::new(kind, &d.pattern, &d.label))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kind, rules)
    }

    /// The built-in branch catalog: `feature/`, `bugfix/`, `hotfix/`, `release/<semver>`,
    /// `chore/`, `docs/`, `test/` and `refactor/`.
    pub fn default_branch_rules() -> Self {
        DEFAULT_BRANCH_RULES.clone()
    }

    /// The built-in commit catalog: `type(scope)?: description` with a bounded description.
    pub fn default_commit_rules() -> Self {
        DEFAULT_COMMIT_RULES.clone()
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The catalog in evaluation order, as serializable definitions.
    pub fn definitions(&self) -> Vec<RuleDefinition> {
        self.rules
            .iter()
            .map(|r| RuleDefinition::new(&r.pattern, &r.label))
            .collect()
    }
}

/// Builds the built-in commit subject pattern.
///
/// The description is bounded by the end of the subject so that descriptions
/// longer than [`MAX_DESCRIPTION_LENGTH`] are rejected.
pub fn default_commit_pattern() -> String {
    format!(
        r"({})(\(.+\))?: .{{1,{}}}$",
        COMMIT_TYPES.join("|"),
        MAX_DESCRIPTION_LENGTH
    )
}

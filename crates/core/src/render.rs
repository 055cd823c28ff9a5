//! # Report Rendering
//!
//! Turns a [`ValidationReport`] into text for people. Rendering is deterministic
//! and performs no I/O; printing the summary or posting the comment is up to the
//! caller.

use indoc::formatdoc;

use crate::config::{BRANCH_COMMENT_MARKER, COMMITS_COMMENT_MARKER, MAX_DESCRIPTION_LENGTH};
use crate::report::ValidationReport;
use crate::rules::RuleKind;

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

/// Returns the plain text summary of a report.
///
/// A passing report renders as a single status line. A failing report lists
/// every invalid candidate verbatim, followed by the allowed patterns and
/// guidelines for fixing them.
pub fn render_summary(report: &ValidationReport) -> String {
    let noun = noun(report.kind);
    if report.passed {
        return format!(
            "{} check passed: {} {} checked, {} skipped.\n",
            capitalize(noun),
            report.total,
            plural(noun, report.total),
            report.skipped()
        );
    }

    let invalid = report
        .invalid_items
        .iter()
        .map(|item| format!("  - {} ({})", item.candidate, item.reason_hint))
        .collect::<Vec<_>>()
        .join("\n");

    formatdoc!(
        "{title} check failed: {count} of {total} {nouns} invalid.

        Invalid {nouns}:
        {invalid}

        Valid patterns:
        {patterns}

        Guidelines:
        {guidelines}
        ",
        title = capitalize(noun),
        count = report.invalid_items.len(),
        total = report.total,
        nouns = plural(noun, 2),
        invalid = invalid,
        patterns = patterns(report, "  - "),
        guidelines = guidelines(report.kind, "  - "),
    )
}

/// Returns a markdown comment body for a failing report, or `None` if the report passed.
///
/// The body starts with a hidden marker so that an earlier comment for the same
/// check can be found and replaced.
pub fn render_comment(report: &ValidationReport) -> Option<String> {
    if report.passed {
        return None;
    }

    let noun = noun(report.kind);
    let marker = match report.kind {
        RuleKind::Branch => BRANCH_COMMENT_MARKER,
        RuleKind::Commit => COMMITS_COMMENT_MARKER,
    };
    let invalid = report
        .invalid_items
        .iter()
        .map(|item| format!("- {}", code_span(&item.candidate)))
        .collect::<Vec<_>>()
        .join("\n");

    Some(formatdoc!(
        "{marker}The following {nouns} of this merge request {verb} correction:

        {invalid}

        Allowed patterns:
        {patterns}

        Guidelines:
        {guidelines}

        Please update the {nouns} listed above and push again.
        ",
        marker = marker,
        nouns = plural(noun, report.invalid_items.len()),
        verb = if report.invalid_items.len() == 1 { "needs" } else { "need" },
        invalid = invalid,
        patterns = patterns(report, "- "),
        guidelines = guidelines(report.kind, "- "),
    ))
}

/// Wraps `text` in a markdown code span that survives backticks inside it.
fn code_span(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    if longest == 0 {
        return format!("`{}`", text);
    }

    let fence = "`".repeat(longest + 1);
    format!("{fence} {text} {fence}", fence = fence, text = text)
}

fn noun(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Branch => "branch name",
        RuleKind::Commit => "commit message",
    }
}

fn plural(noun: &str, count: usize) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn patterns(report: &ValidationReport, bullet: &str) -> String {
    report
        .expected
        .iter()
        .map(|d| format!("{}`{}` ({})", bullet, d.pattern, d.label))
        .collect::<Vec<_>>()
        .join("\n")
}

fn guidelines(kind: RuleKind, bullet: &str) -> String {
    let lines: Vec<String> = match kind {
        RuleKind::Branch => vec![
            "Use one of the prefixes above followed by a short name".to_string(),
            "Use lowercase letters, digits and hyphens only".to_string(),
            "Do not use spaces or underscores".to_string(),
            "Release branches use a semantic version, e.g. `release/1.2.3`".to_string(),
        ],
        RuleKind::Commit => vec![
            "Format: `<type>(<optional scope>): <description>`".to_string(),
            "Write the type in lowercase, e.g. `feat: add login`".to_string(),
            "Use the imperative mood: \"add\", not \"added\" or \"adds\"".to_string(),
            format!(
                "Keep the description between 1 and {} characters",
                MAX_DESCRIPTION_LENGTH
            ),
            "Merge commits are not checked".to_string(),
        ],
    };

    lines
        .iter()
        .map(|line| format!("{}{}", bullet, line))
        .collect::<Vec<_>>()
        .join("\n")
}

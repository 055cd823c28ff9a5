use super::*;
use crate::branch::validate_branch;
use crate::commits::validate_commits;

#[test]
fn test_summary_for_passing_branch() {
    let report = validate_branch("feature/login");

    assert_eq!(
        render_summary(&report),
        "Branch name check passed: 1 branch name checked, 0 skipped.\n"
    );
}

#[test]
fn test_summary_for_passing_commits() {
    let report = validate_commits(&["feat: a", "Merge branch x", "fix: b"]);

    assert_eq!(
        render_summary(&report),
        "Commit message check passed: 2 commit messages checked, 1 skipped.\n"
    );
}

#[test]
fn test_summary_lists_invalid_commits_verbatim() {
    let report = validate_commits(&["feat: a", "bad commit", "Merge branch x", "Fix: B"]);

    let summary = render_summary(&report);

    assert!(summary.starts_with("Commit message check failed: 2 of 3 commit messages invalid.\n"));
    assert!(summary.contains("\n  - bad commit (commit subject does not match any allowed pattern)\n"));
    assert!(summary.contains("\n  - Fix: B ("));
    assert!(!summary.contains("Merge branch x"));
    assert!(summary.contains("Valid patterns:\n  - `(feat|fix|"));
    assert!(summary.contains("Keep the description between 1 and 50 characters"));
    assert!(summary.contains("imperative mood"));
}

#[test]
fn test_summary_for_invalid_branch_lists_every_pattern() {
    let report = validate_branch("my_branch");

    let summary = render_summary(&report);

    assert!(summary.starts_with("Branch name check failed: 1 of 1 branch names invalid.\n"));
    assert!(summary.contains("  - my_branch (branch name does not match any allowed pattern)"));
    for (pattern, label) in crate::config::BRANCH_RULE_CATALOG {
        assert!(
            summary.contains(&format!("  - `{}` ({})", pattern, label)),
            "Summary should list pattern {}",
            pattern
        );
    }
    assert!(summary.contains("Use lowercase letters, digits and hyphens only"));
}

#[test]
fn test_summary_lines_are_not_indented_by_the_template() {
    let report = validate_branch("nope");

    let summary = render_summary(&report);

    for line in summary.lines() {
        assert!(
            line.is_empty() || !line.starts_with("    "),
            "Line '{}' should not carry template indentation",
            line
        );
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let report = validate_commits(&["wip", "feat: a"]);

    assert_eq!(render_summary(&report), render_summary(&report));
    assert_eq!(render_comment(&report), render_comment(&report));
}

#[test]
fn test_no_comment_for_passing_report() {
    assert!(render_comment(&validate_branch("docs/readme")).is_none());
    assert!(render_comment(&validate_commits::<&str>(&[])).is_none());
}

#[test]
fn test_commit_comment() {
    let report = validate_commits(&["wip", "feat: a"]);

    let comment = render_comment(&report).unwrap();

    assert!(comment.starts_with(COMMITS_COMMENT_MARKER));
    assert!(comment.contains("The following commit message of this merge request needs correction:"));
    assert!(comment.contains("\n- `wip`\n"));
    assert!(!comment.contains("`feat: a`"));
    assert!(comment.contains("Please update the commit message listed above"));
}

#[test]
fn test_branch_comment() {
    let report = validate_branch("Feature/Login");

    let comment = render_comment(&report).unwrap();

    assert!(comment.starts_with(BRANCH_COMMENT_MARKER));
    assert!(comment.contains("The following branch name of this merge request needs correction:"));
    assert!(comment.contains("- `Feature/Login`"));
    assert!(comment.contains("- `feature/[a-z0-9-]+` (feature)"));
}

#[test]
fn test_comment_keeps_backticks_in_candidates_inside_the_code_span() {
    let report = validate_commits(&["update `config` file", "use ``raw`` strings"]);

    let comment = render_comment(&report).unwrap();

    assert!(comment.contains("\n- `` update `config` file ``\n"));
    assert!(comment.contains("\n- ``` use ``raw`` strings ```\n"));
}

#[test]
fn test_code_span() {
    assert_eq!(code_span("wip"), "`wip`");
    assert_eq!(code_span("a`b"), "`` a`b ``");
    assert_eq!(code_span("`"), "`` ` ``");
}

use super::*;
use convention_gate_core::config::{BRANCH_COMMENT_MARKER, COMMITS_COMMENT_MARKER};
use convention_gate_core::rules::RuleKind;
use tempfile::TempDir;

fn merge_request(branch: &str) -> TriggerContext {
    TriggerContext::MergeRequest {
        source_branch: branch.to_string(),
        base: "base-sha".to_string(),
        head: "head-sha".to_string(),
    }
}

fn commits(subjects: &[&str]) -> Vec<CommitRecord> {
    subjects.iter().map(|s| CommitRecord::new(s)).collect()
}

#[test]
fn test_push_only_checks_the_branch() {
    let gate = ConventionGate::new();
    let trigger = TriggerContext::Push {
        branch: "feature/login".to_string(),
    };

    let reports = evaluate(&gate, &trigger, |_, _| {
        panic!("A push must not fetch commits")
    })
    .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, RuleKind::Branch);
    assert!(reports[0].passed);
}

#[test]
fn test_merge_request_checks_branch_and_commits() {
    let gate = ConventionGate::new();

    let reports = evaluate(&gate, &merge_request("feature/login"), |base, head| {
        assert_eq!((base, head), ("base-sha", "head-sha"));
        Ok(commits(&["feat: a", "bad commit", "Merge branch x", "fix: b"]))
    })
    .unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports[0].passed);
    assert_eq!(reports[1].kind, RuleKind::Commit);
    assert_eq!(reports[1].total, 3);
    assert!(!reports[1].passed);
}

#[test]
fn test_fetch_failure_aborts_before_validation() {
    let gate = ConventionGate::new();

    let result = evaluate(&gate, &merge_request("feature/login"), |_, _| {
        Err(CliError::GitError("bad revision".to_string()))
    });

    assert!(matches!(result, Err(CliError::GitError(_))));
}

#[test]
fn test_no_comment_for_push() {
    let gate = ConventionGate::new();
    let trigger = TriggerContext::Push {
        branch: "Bad Branch".to_string(),
    };
    let reports = evaluate(&gate, &trigger, |_, _| Ok(Vec::new())).unwrap();

    assert!(!reports[0].passed);
    assert!(comment_body(&trigger, &reports).is_none());
}

#[test]
fn test_no_comment_for_passing_merge_request() {
    let gate = ConventionGate::new();
    let trigger = merge_request("docs/readme");
    let reports = evaluate(&gate, &trigger, |_, _| Ok(commits(&["docs: fix typo"]))).unwrap();

    assert!(comment_body(&trigger, &reports).is_none());
}

#[test]
fn test_comment_for_failing_merge_request() {
    let gate = ConventionGate::new();
    let trigger = merge_request("Feature/Login");
    let reports = evaluate(&gate, &trigger, |_, _| Ok(commits(&["wip"]))).unwrap();

    let comment = comment_body(&trigger, &reports).unwrap();

    assert!(comment.starts_with(BRANCH_COMMENT_MARKER));
    assert!(comment.contains(COMMITS_COMMENT_MARKER));
    assert!(comment.contains("`Feature/Login`"));
    assert!(comment.contains("`wip`"));
}

#[test]
fn test_comment_only_contains_failing_checks() {
    let gate = ConventionGate::new();
    let trigger = merge_request("feature/login");
    let reports = evaluate(&gate, &trigger, |_, _| Ok(commits(&["wip"]))).unwrap();

    let comment = comment_body(&trigger, &reports).unwrap();

    assert!(comment.starts_with(COMMITS_COMMENT_MARKER));
    assert!(!comment.contains(BRANCH_COMMENT_MARKER));
}

#[test]
fn test_write_comment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("comment.md");

    write_comment(&path, "body").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "body");
}

#[test]
fn test_write_comment_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("comment.md");

    assert!(matches!(
        write_comment(&path, "body"),
        Err(CliError::IoError(_))
    ));
}

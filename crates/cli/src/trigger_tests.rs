use super::*;
use std::collections::HashMap;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_gitlab_merge_request() {
    let lookup = env(&[
        ("GITLAB_CI", "true"),
        ("CI_PIPELINE_SOURCE", "merge_request_event"),
        ("CI_MERGE_REQUEST_SOURCE_BRANCH_NAME", "feature/login"),
        ("CI_MERGE_REQUEST_DIFF_BASE_SHA", "abc123"),
        ("CI_COMMIT_SHA", "def456"),
    ]);

    let trigger = detect_trigger(lookup).unwrap();

    assert_eq!(
        trigger,
        TriggerContext::MergeRequest {
            source_branch: "feature/login".to_string(),
            base: "abc123".to_string(),
            head: "def456".to_string(),
        }
    );
    assert_eq!(trigger.branch(), "feature/login");
}

#[test]
fn test_gitlab_push() {
    let lookup = env(&[
        ("GITLAB_CI", "true"),
        ("CI_PIPELINE_SOURCE", "push"),
        ("CI_COMMIT_REF_NAME", "hotfix/outage"),
    ]);

    let trigger = detect_trigger(lookup).unwrap();

    assert_eq!(
        trigger,
        TriggerContext::Push {
            branch: "hotfix/outage".to_string()
        }
    );
}

#[test]
fn test_gitlab_merge_request_without_base_fails() {
    let lookup = env(&[
        ("CI_PIPELINE_SOURCE", "merge_request_event"),
        ("CI_MERGE_REQUEST_SOURCE_BRANCH_NAME", "feature/login"),
        ("CI_COMMIT_SHA", "def456"),
    ]);

    let result = detect_trigger(lookup);

    match result {
        Err(CliError::InvalidArguments(message)) => {
            assert!(message.contains("CI_MERGE_REQUEST_DIFF_BASE_SHA"))
        }
        other => panic!("Expected missing variable error, got {:?}", other),
    }
}

#[test]
fn test_github_pull_request() {
    let lookup = env(&[
        ("GITHUB_ACTIONS", "true"),
        ("GITHUB_EVENT_NAME", "pull_request"),
        ("GITHUB_HEAD_REF", "bugfix/null-check"),
        ("GITHUB_BASE_REF", "main"),
        ("GITHUB_SHA", "0123abcd"),
    ]);

    let trigger = detect_trigger(lookup).unwrap();

    assert_eq!(
        trigger,
        TriggerContext::MergeRequest {
            source_branch: "bugfix/null-check".to_string(),
            base: "origin/main".to_string(),
            head: "0123abcd".to_string(),
        }
    );
}

#[test]
fn test_github_push() {
    let lookup = env(&[
        ("GITHUB_ACTIONS", "true"),
        ("GITHUB_EVENT_NAME", "push"),
        ("GITHUB_REF_NAME", "docs/readme"),
    ]);

    let trigger = detect_trigger(lookup).unwrap();

    assert_eq!(trigger.branch(), "docs/readme");
    assert!(matches!(trigger, TriggerContext::Push { .. }));
}

#[test]
fn test_empty_variable_counts_as_missing() {
    let lookup = env(&[("GITHUB_EVENT_NAME", "push"), ("GITHUB_REF_NAME", "")]);

    assert!(matches!(
        detect_trigger(lookup),
        Err(CliError::InvalidArguments(_))
    ));
}

#[test]
fn test_unknown_ci_system() {
    let lookup = env(&[("JENKINS_URL", "https://ci.example.com")]);

    assert!(matches!(
        detect_trigger(lookup),
        Err(CliError::InvalidArguments(_))
    ));
}

use super::*;
use convention_gate_core::branch::validate_branch;
use convention_gate_core::commits::validate_commits;

#[test]
fn test_passing_run() {
    let branch = validate_branch("feature/login");
    let run = RunOutput::new(None, vec![&branch]);

    assert!(run.passed);
    assert!(into_result(&run).is_ok());
}

#[test]
fn test_failing_run() {
    let branch = validate_branch("feature/login");
    let commits = validate_commits(&["wip", "also wip", "feat: a"]);
    let run = RunOutput::new(None, vec![&branch, &commits]);

    assert!(!run.passed);
    match into_result(&run) {
        Err(CliError::ValidationFailed(message)) => {
            assert_eq!(message, "2 candidate(s) do not follow the conventions")
        }
        other => panic!("Expected a validation failure, got {:?}", other),
    }
}

#[test]
fn test_text_output_concatenates_summaries() {
    let branch = validate_branch("feature/login");
    let commits = validate_commits(&["feat: a"]);
    let run = RunOutput::new(None, vec![&branch, &commits]);

    let text = format_run(&run, OutputFormat::Text).unwrap();

    assert_eq!(
        text,
        "Branch name check passed: 1 branch name checked, 0 skipped.\n\nCommit message check passed: 1 commit message checked, 0 skipped.\n"
    );
}

#[test]
fn test_json_output() {
    let trigger = TriggerContext::Push {
        branch: "Feature/Login".to_string(),
    };
    let branch = validate_branch("Feature/Login");
    let run = RunOutput::new(Some(&trigger), vec![&branch]);

    let json = format_run(&run, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["passed"], false);
    assert_eq!(value["trigger"]["event"], "push");
    assert_eq!(value["trigger"]["branch"], "Feature/Login");
    assert_eq!(value["reports"][0]["invalid_items"][0]["candidate"], "Feature/Login");
}

#[test]
fn test_json_output_without_trigger() {
    let commits = validate_commits::<&str>(&[]);
    let run = RunOutput::new(None, vec![&commits]);

    let json = format_run(&run, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert!(value.get("trigger").is_none());
    assert_eq!(value["reports"][0]["total"], 0);
}

#[test]
fn test_write_run() {
    let branch = validate_branch("docs/readme");
    let run = RunOutput::new(None, vec![&branch]);
    let mut buffer = Vec::new();

    write_run(&mut buffer, &run, OutputFormat::Text).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "Branch name check passed: 1 branch name checked, 0 skipped.\n"
    );
}

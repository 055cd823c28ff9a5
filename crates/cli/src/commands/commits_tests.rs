use super::*;
use std::io::Cursor;
use tempfile::TempDir;

fn args_with_file(file: Option<PathBuf>) -> CommitsArgs {
    CommitsArgs {
        base: None,
        head: None,
        file,
        repo: PathBuf::from("."),
    }
}

#[test]
fn test_read_subjects() {
    let input = Cursor::new("feat: a\r\nbad commit\n\nMerge branch x\n");

    let subjects = read_subjects(input).unwrap();

    assert_eq!(subjects, vec!["feat: a", "bad commit", "", "Merge branch x"]);
}

#[test]
fn test_read_subjects_empty_input() {
    assert!(read_subjects(Cursor::new("")).unwrap().is_empty());
}

#[test]
fn test_collect_commits_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("subjects.txt");
    std::fs::write(&path, "fix(auth): token refresh\nwip\n").unwrap();

    let commits = collect_commits(&args_with_file(Some(path))).unwrap();

    let subjects: Vec<&str> = commits.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(subjects, vec!["fix(auth): token refresh", "wip"]);
    assert!(commits.iter().all(|c| c.sha.is_none()));
}

#[test]
fn test_collect_commits_from_missing_file() {
    let dir = TempDir::new().unwrap();

    let result = collect_commits(&args_with_file(Some(dir.path().join("missing.txt"))));

    match result {
        Err(CliError::IoError(message)) => {
            assert!(message.starts_with("Failed to open commit subjects file"))
        }
        other => panic!("Expected an I/O error, got {:?}", other),
    }
}

#[test]
fn test_collect_commits_requires_a_source() {
    let result = collect_commits(&args_with_file(None));

    match result {
        Err(CliError::InvalidArguments(message)) => assert!(message.contains("--file")),
        other => panic!("Expected an invalid arguments error, got {:?}", other),
    }
}

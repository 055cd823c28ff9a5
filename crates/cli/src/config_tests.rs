use super::*;
use convention_gate_core::config::MergeDetection;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_get_config_path_explicit() {
    assert_eq!(
        get_config_path(Some("conf/gate.toml")),
        PathBuf::from("conf/gate.toml")
    );
}

#[test]
fn test_get_config_path_default() {
    let path = get_config_path(None);

    assert!(path.ends_with(DEFAULT_CONFIG_FILENAME));
}

#[test]
fn test_load_missing_config_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let config = load_config(&dir.path().join(DEFAULT_CONFIG_FILENAME)).unwrap();

    assert_eq!(config, ConventionConfig::default());
}

#[test]
fn test_load_existing_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
    fs::write(
        &path,
        "schemaVersion = 1\n[commits]\nmergeDetection = \"parent-count\"\n",
    )
    .unwrap();

    let config = load_config(&path).unwrap();

    assert_eq!(config.commits.merge_detection, MergeDetection::ParentCount);
}

#[test]
fn test_load_broken_config_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILENAME);
    fs::write(&path, "schemaVersion = \"one\"").unwrap();

    let result = load_config(&path);

    assert!(matches!(result, Err(CliError::ConfigError(_))));
}

#[test]
fn test_save_config_creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join(DEFAULT_CONFIG_FILENAME);
    let mut config = ConventionConfig::default();
    config.branches.enabled = false;

    save_config(&config, &path).unwrap();

    assert_eq!(load_config(&path).unwrap(), config);
}

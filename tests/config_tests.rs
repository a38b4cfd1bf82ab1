//! Configuration layering and validation tests.

use ig_tracker::cli::{resolve_config, TrackOptions};
use ig_tracker::config::{FileConfig, OutputConfig, Validatable};
use ig_tracker::error::TrackerError;
use ig_tracker::snapshot::MalformedSnapshotPolicy;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("ig-tracker.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

fn options(config_file: PathBuf, overrides: FileConfig) -> TrackOptions {
    TrackOptions {
        config_file: Some(config_file),
        overrides,
        ..TrackOptions::default()
    }
}

#[test]
fn file_values_fill_missing_cli_values() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        "target: from_file\naccount: file_account\non_malformed_snapshot: reset\nfetch:\n  page_size: 25\n",
    );

    let config = resolve_config(&options(path, FileConfig::default())).unwrap();

    assert_eq!(config.target, "from_file");
    assert_eq!(config.account, "file_account");
    assert_eq!(config.on_malformed_snapshot, MalformedSnapshotPolicy::Reset);
    assert_eq!(config.fetch.page_size, 25);
    assert_eq!(config.fetch.timeout_secs, 30);
}

#[test]
fn cli_values_override_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        "target: from_file\naccount: file_account\ndata_dir: /srv/file\n",
    );
    let overrides = FileConfig {
        target: Some("from_cli".to_string()),
        data_dir: Some(tmp.path().join("cli_data")),
        ..FileConfig::default()
    };

    let config = resolve_config(&options(path, overrides)).unwrap();

    assert_eq!(config.target, "from_cli");
    assert_eq!(config.account, "file_account");
    assert_eq!(config.data_dir, tmp.path().join("cli_data"));
}

#[test]
fn missing_account_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "target: someone\n");

    let err = resolve_config(&options(path, FileConfig::default())).unwrap_err();

    assert!(matches!(err, TrackerError::Config(_)));
    assert!(err.is_fatal_precondition());
}

#[test]
fn invalid_values_are_config_errors() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        "target: someone\naccount: me\nprofile_url_base: instagram.com\nfetch:\n  page_size: 0\n",
    );

    let err = resolve_config(&options(path, FileConfig::default())).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("profile_url_base"));
    assert!(message.contains("fetch.page_size"));
}

#[test]
fn unparseable_file_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "target: [unclosed\n");

    let err = resolve_config(&options(path, FileConfig::default())).unwrap_err();
    assert!(matches!(err, TrackerError::Config(_)));
}

#[test]
fn empty_file_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "");
    let overrides = FileConfig {
        target: Some("someone".to_string()),
        account: Some("me".to_string()),
        ..FileConfig::default()
    };

    let config = resolve_config(&options(path, overrides)).unwrap();

    assert_eq!(config.data_dir, PathBuf::from("instagram_tracking"));
    assert_eq!(config.profile_url_base, "https://instagram.com/");
    assert!(config.is_valid());
}

#[test]
fn explicit_session_file_is_kept() {
    let config = FileConfig {
        target: Some("someone".to_string()),
        account: Some("me".to_string()),
        session_file: Some(PathBuf::from("/tmp/session.json")),
        ..FileConfig::default()
    }
    .resolve(false, OutputConfig::default())
    .unwrap();

    assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
    assert_eq!(
        config.client_config().session_file,
        PathBuf::from("/tmp/session.json")
    );
}

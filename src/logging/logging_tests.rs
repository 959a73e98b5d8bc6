//! Tests for tracing subscriber initialization.

use super::*;
use serial_test::serial;
use std::fs;

fn test_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mushaf_test_logs_{}_{name}", std::process::id()))
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let dir = test_dir("create");
    let log_file = dir.join("nested").join("mushaf.log");
    let _ = fs::remove_dir_all(&dir);

    // May fail with SubscriberAlreadySet when another test initialised first.
    let _ = init(&log_file);

    assert!(
        log_file.parent().is_some_and(Path::exists),
        "Log directory should be created: {:?}",
        log_file.parent()
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let dir = test_dir("twice");
    let log_file = dir.join("mushaf.log");

    let _ = init(&log_file);
    let second = init(&log_file);

    assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn path_without_file_name_is_invalid() {
    let result = split_log_path(Path::new("/"));
    assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
}

#[test]
fn split_separates_directory_and_file() {
    let (dir, file) = split_log_path(Path::new("/var/log/mushaf/mushaf.log")).unwrap();
    assert_eq!(dir, Path::new("/var/log/mushaf"));
    assert_eq!(file, "mushaf.log");
}

#[test]
fn directory_error_mentions_path() {
    let err = LoggingError::DirectoryCreation {
        path: PathBuf::from("/readonly/mushaf"),
        source: std::io::Error::other("denied"),
    };
    assert!(err.to_string().contains("/readonly/mushaf"));
}

//! Integration tests for [`JsonPlannerStorage`] against a real filesystem.
//!
//! Each test works inside its own temporary directory.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;

use rendezvous_model::{Planner, PlannerSnapshot, create_sample_planner};
use rendezvous_storage::{JsonPlannerStorage, StorageError};
use rendezvous_types::{Email, Name, Person, Phone};

#[test]
fn missing_file_reads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonPlannerStorage::new(dir.path().join("planner.json"));

    assert!(store.read().unwrap().is_none());
}

#[test]
fn save_then_read_reproduces_the_planner() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonPlannerStorage::new(dir.path().join("planner.json"));
    let planner = create_sample_planner().unwrap();

    store.save(&planner.snapshot()).unwrap();
    let restored = store.read().unwrap().unwrap();

    let reloaded = Planner::from_snapshot(restored).unwrap();
    assert_eq!(reloaded.snapshot(), planner.snapshot());
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("planner.json");
    let store = JsonPlannerStorage::new(&path);

    store.save(&PlannerSnapshot::default()).unwrap();

    assert!(path.is_file());
    assert!(!path.with_file_name("planner.json.tmp").exists());
}

#[test]
fn save_overwrites_previous_content() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonPlannerStorage::new(dir.path().join("planner.json"));
    store.save(&create_sample_planner().unwrap().snapshot()).unwrap();

    let only_alice = PlannerSnapshot {
        persons: vec![Person::new(
            Name::parse("Alice").unwrap(),
            Phone::parse("111").unwrap(),
            Email::parse("a@x.com").unwrap(),
        )],
        ..PlannerSnapshot::default()
    };
    store.save(&only_alice).unwrap();

    assert_eq!(store.read().unwrap(), Some(only_alice));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.json");
    fs::write(&path, "{ not json").unwrap();

    let result = JsonPlannerStorage::new(&path).read();

    assert!(matches!(result, Err(StorageError::Serialization { .. })));
}

#[test]
fn invalid_field_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.json");
    fs::write(
        &path,
        r#"{ "persons": [ { "name": "Alice", "phone": "not-a-phone", "email": "a@x.com" } ] }"#,
    )
    .unwrap();

    let result = JsonPlannerStorage::new(&path).read();

    assert!(matches!(result, Err(StorageError::Serialization { .. })));
}

#[test]
fn directory_in_place_of_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = JsonPlannerStorage::new(dir.path()).read();

    assert!(matches!(result, Err(StorageError::Io { .. })));
}

#[test]
fn failed_temp_write_reports_the_temp_path_and_leaves_target_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.json");
    // A non-empty directory where the temporary file goes: creating the file
    // fails, and so does removing it afterwards.
    let blocker = dir.path().join("planner.json.tmp");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), b"x").unwrap();

    let result = JsonPlannerStorage::new(&path).save(&PlannerSnapshot::default());

    match result {
        Err(StorageError::Io { path: reported, .. }) => assert_eq!(reported, blocker),
        other => panic!("expected an Io error, got {other:?}"),
    }
    assert!(blocker.is_dir());
    assert!(!path.exists());
}

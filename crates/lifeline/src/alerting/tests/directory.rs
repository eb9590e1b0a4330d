use std::fs;

use super::common::user_record;
use crate::alerting::directory::{
    ContactDirectory, InMemoryContactDirectory, JsonFileContactDirectory,
};
use crate::alerting::domain::UserId;

#[test]
fn lookup_miss_is_none_not_an_error() {
    let directory = InMemoryContactDirectory::default();

    let found = directory
        .lookup(&UserId("nobody".to_string()))
        .expect("lookup succeeds");
    assert!(found.is_none());
}

#[test]
fn registration_overwrites_previous_record() {
    let directory = InMemoryContactDirectory::default();

    directory
        .register(user_record("alice", "+1555", &["bob@x.com"]))
        .expect("first registration succeeds");
    directory
        .register(user_record("alice", "+1999", &["carol@x.com"]))
        .expect("second registration succeeds");

    let record = directory
        .lookup(&UserId("alice".to_string()))
        .expect("lookup succeeds")
        .expect("record present");
    assert_eq!(record.phone, "+1999");
    assert_eq!(record.emergency_contacts, vec!["carol@x.com".to_string()]);
}

#[test]
fn user_ids_lists_registered_users() {
    let directory = InMemoryContactDirectory::default();
    directory
        .register(user_record("alice", "+1555", &[]))
        .expect("registration succeeds");
    directory
        .register(user_record("dana", "+1666", &[]))
        .expect("registration succeeds");

    let mut ids = directory.user_ids().expect("listing succeeds");
    ids.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        ids,
        vec![UserId("alice".to_string()), UserId("dana".to_string())]
    );
}

#[test]
fn file_directory_persists_across_instances() {
    let dir = tempfile::tempdir().expect("temp dir creates");
    let path = dir.path().join("users.json");

    {
        let directory = JsonFileContactDirectory::new(&path);
        directory
            .register(user_record("alice", "+1555", &["bob@x.com"]))
            .expect("registration succeeds");
    }

    let reopened = JsonFileContactDirectory::new(&path);
    let record = reopened
        .lookup(&UserId("alice".to_string()))
        .expect("lookup succeeds")
        .expect("record survives reopen");
    assert_eq!(record.phone, "+1555");
    assert_eq!(record.emergency_contacts, vec!["bob@x.com".to_string()]);
}

#[test]
fn file_directory_overwrites_wholesale() {
    let dir = tempfile::tempdir().expect("temp dir creates");
    let path = dir.path().join("users.json");
    let directory = JsonFileContactDirectory::new(&path);

    directory
        .register(user_record("alice", "+1555", &["bob@x.com", "+1777"]))
        .expect("registration succeeds");
    directory
        .register(user_record("alice", "+1555", &[]))
        .expect("re-registration succeeds");

    let record = directory
        .lookup(&UserId("alice".to_string()))
        .expect("lookup succeeds")
        .expect("record present");
    assert!(record.emergency_contacts.is_empty());
}

#[test]
fn rewrite_leaves_no_staging_file_behind() {
    let dir = tempfile::tempdir().expect("temp dir creates");
    let path = dir.path().join("users.json");
    let directory = JsonFileContactDirectory::new(&path);

    directory
        .register(user_record("alice", "+1555", &[]))
        .expect("registration succeeds");

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn corrupt_store_reads_as_empty() {
    let dir = tempfile::tempdir().expect("temp dir creates");
    let path = dir.path().join("users.json");
    fs::write(&path, "not json at all").expect("corrupt file writes");

    let directory = JsonFileContactDirectory::new(&path);
    let found = directory
        .lookup(&UserId("alice".to_string()))
        .expect("lookup succeeds");
    assert!(found.is_none());

    // Registration recovers the store.
    directory
        .register(user_record("alice", "+1555", &[]))
        .expect("registration succeeds");
    assert!(directory
        .lookup(&UserId("alice".to_string()))
        .expect("lookup succeeds")
        .is_some());
}

#[test]
fn missing_parent_directory_is_created() {
    let dir = tempfile::tempdir().expect("temp dir creates");
    let path = dir.path().join("data").join("users.json");
    let directory = JsonFileContactDirectory::new(&path);

    directory
        .register(user_record("alice", "+1555", &[]))
        .expect("registration succeeds");
    assert!(path.exists());
}

mod common;

use common::versions;
use grape::{Schema, SqliteStore, Version};

fn store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert_all(&versions()).unwrap();
    store
}

#[test]
fn test_db() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.is_connected());
}

#[test]
fn test_get_versions() {
    let store = store();
    let all = store.all::<Version>().unwrap();
    assert_eq!(all.len(), 2);

    let codes: Vec<String> = versions().into_iter().map(|v| v.version_code).collect();
    for version in all {
        let serialized = version.dump().unwrap();
        let code = serialized["version_code"].as_str().unwrap();
        assert!(codes.iter().any(|c| c == code));
    }
}

#[test]
fn test_get_version_by_name() {
    let store = store();
    let version = store
        .first_by::<Version>("version_name", "winecountry".to_string())
        .unwrap()
        .unwrap();
    assert_eq!(version.version_name, "winecountry");
    assert_eq!(version.version_code, "1.0.0");
}

#[test]
fn test_query_nonexistent_version() {
    let store = store();
    let version = store
        .first_by::<Version>("version_name", "notwinecountry".to_string())
        .unwrap();
    assert!(version.is_none());
}

#[test]
fn test_duplicate_code_rejected() {
    let store = store();
    assert!(store.insert(&Version::new("1.0.0", "another")).is_err());
    assert_eq!(store.count::<Version>().unwrap(), 2);
}

#[test]
fn test_delete_all_versions() {
    let mut store = store();
    store.begin_transaction().unwrap();
    assert_eq!(store.delete_all::<Version>().unwrap(), 2);
    store.commit().unwrap();
    assert!(store.all::<Version>().unwrap().is_empty());
}

#[test]
fn test_versions_persist_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grape.db");
    {
        let store = SqliteStore::open(&path).unwrap();
        store.insert_all(&versions()).unwrap();
    }
    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(reopened.count::<Version>().unwrap(), 2);
    assert!(reopened.foreign_keys_enabled().unwrap());
}

#[test]
fn test_text_keyed_rows_come_back_in_insertion_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .insert_all(&[Version::new("2.0.0", "winecountry2"), Version::new("1.0.0", "winecountry")])
        .unwrap();
    let codes: Vec<String> = store.all::<Version>().unwrap().into_iter().map(|v| v.version_code).collect();
    assert_eq!(codes, vec!["2.0.0", "1.0.0"]);
}

mod common;

use common::types;
use grape::{DataType, Schema, SqliteStore};

fn store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert_all(&types()).unwrap();
    store
}

#[test]
fn test_get_types() {
    let store = store();
    let all = store.all::<DataType>().unwrap();
    assert_eq!(all.len(), 3);

    let names: Vec<String> = types().into_iter().map(|t| t.type_name).collect();
    for data_type in all {
        let serialized = data_type.dump().unwrap();
        let name = serialized["type_name"].as_str().unwrap();
        assert!(names.iter().any(|n| n == name));
    }
}

#[test]
fn test_get_types_by_name() {
    let store = store();
    let data_type = store
        .first_by::<DataType>("type_name", "String".to_string())
        .unwrap()
        .unwrap();
    assert_eq!(data_type.type_name, "String");
    assert_eq!(data_type.type_id, 1);
}

#[test]
fn test_query_nonexistent_type() {
    let store = store();
    assert!(
        store
            .first_by::<DataType>("type_name", "hashmap".to_string())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_all_types() {
    let store = store();
    assert_eq!(store.delete_all::<DataType>().unwrap(), 3);
    assert_eq!(store.count::<DataType>().unwrap(), 0);
}

#[test]
fn test_integer_keyed_rows_come_back_by_key() {
    let store = store();
    let ids: Vec<i64> = store.all::<DataType>().unwrap().into_iter().map(|t| t.type_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

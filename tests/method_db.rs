mod common;

use common::{methods, seeded_store, today};
use grape::{Class, Filter, Method, Schema, SqliteStore};

#[test]
fn test_get_methods() {
    let store = seeded_store();
    let all = store.all::<Method>().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all, methods());
}

#[test]
fn test_coverage_round_trips() {
    let store = seeded_store();
    let method = store.get::<Method>(1).unwrap().unwrap();
    assert_eq!(method.human_test_coverage, Some(10.0));
    assert_eq!(method.fuzzer_test_coverage, Some(30.0));
    assert_eq!(method.created, Some(today()));

    let serialized = method.dump().unwrap();
    assert_eq!(serialized["method_name"], "method1");
    assert_eq!(serialized["human_test_coverage"], 10.0);
    assert_eq!(serialized["version_id"], "1.0.0");
}

#[test]
fn test_methods_by_class_and_version() {
    let store = seeded_store();
    assert_eq!(store.methods_in_class(1).unwrap().len(), 1);

    let names: Vec<String> = store
        .methods_in_version("1.0.0")
        .unwrap()
        .into_iter()
        .map(|m| m.method_name)
        .collect();
    assert_eq!(names, vec!["method1", "method3"]);
}

#[test]
fn test_methods_through_class_module_version() {
    let store = seeded_store();
    let methods = store
        .query::<Method>()
        .filter(Filter::has(
            "class",
            Filter::has("module", Filter::eq("module_name", "WineModuleExtra".to_string())),
        ))
        .all()
        .unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].method_name, "method2");
}

#[test]
fn test_method_without_version() {
    let store = seeded_store();
    store.insert(&Method::new(9, "unversioned", 1)).unwrap();
    let unversioned = store
        .find_by::<Method>("version_id", rusqlite::types::Value::Null)
        .unwrap();
    assert_eq!(unversioned.len(), 1);
    assert_eq!(unversioned[0].method_id, 9);
}

#[test]
fn test_method_requires_existing_class() {
    let store = seeded_store();
    assert!(store.insert(&Method::new(10, "orphan", 99)).is_err());
    assert!(store.insert(&Method::new(10, "orphan", 1).with_version("9.9.9")).is_err());
}

#[test]
fn test_class_delete_blocked_by_methods() {
    let store = seeded_store();
    assert!(store.delete_all::<Class>().is_err());
    assert!(store.clear_all().is_ok());
    assert_eq!(store.count::<Method>().unwrap(), 0);
}

#[test]
fn test_empty_store_has_no_methods() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.all::<Method>().unwrap().is_empty());
    assert!(store.get::<Method>(1).unwrap().is_none());
}

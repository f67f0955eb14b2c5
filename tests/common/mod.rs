#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use grape::{Class, DataType, Method, MethodArgs, Module, SqliteStore, Version};

pub fn today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap()
}

pub fn versions() -> Vec<Version> {
    vec![
        Version::new("1.0.0", "winecountry"),
        Version::new("2.0.0", "winecountry2"),
    ]
}

pub fn types() -> Vec<DataType> {
    vec![
        DataType::new(1, "String"),
        DataType::new(3, "Integer"),
        DataType::new(2, "Float"),
    ]
}

pub fn modules() -> Vec<Module> {
    vec![
        Module::new(1, "WineModule", "1.0.0").with_created(today()),
        Module::new(2, "WineModuleExtra", "2.0.0").with_created(today()),
        Module::new(3, "WineModuleExtraWine", "1.0.0").with_created(today()),
    ]
}

pub fn classes() -> Vec<Class> {
    vec![
        Class::new(1, "Class1", 1).with_description("some desc"),
        Class::new(3, "Class2", 2).with_description("some description"),
        Class::new(4, "Class3", 1).with_description("some description"),
    ]
}

pub fn methods() -> Vec<Method> {
    vec![
        Method::new(1, "method1", 1)
            .with_coverage(10.0, 30.0)
            .with_description("somedesc")
            .with_created(today())
            .with_version("1.0.0"),
        Method::new(2, "method2", 3)
            .with_coverage(55.5, 0.0)
            .with_version("2.0.0"),
        Method::new(3, "method3", 4).with_version("1.0.0"),
    ]
}

pub fn arguments() -> Vec<MethodArgs> {
    vec![
        MethodArgs::new(1, "firstarg", 1)
            .with_description("some desc")
            .with_default(1337)
            .with_type(3),
        MethodArgs::new(2, "secondarg", 1)
            .with_description("some desc")
            .with_default("OMG")
            .with_type(1),
    ]
}

/// Store holding every fixture, parents inserted first
pub fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert_all(&versions()).unwrap();
    store.insert_all(&types()).unwrap();
    store.insert_all(&modules()).unwrap();
    store.insert_all(&classes()).unwrap();
    store.insert_all(&methods()).unwrap();
    store.insert_all(&arguments()).unwrap();
    store
}

//! Field/value serializers for entity records
//!
//! `dump` turns a record into a map keyed by column name; `load` goes the
//! other way and rejects fields the record does not have.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use crate::Result;
use crate::storage::Record;

pub trait Schema: Record + Serialize + DeserializeOwned {
    /// Field-to-value mapping mirroring the table columns
    fn dump(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "{} row did not serialize to a map",
                Self::TABLE
            ))
            .into()),
        }
    }

    fn dump_many(records: &[Self]) -> Result<Vec<Map<String, Value>>> {
        records.iter().map(|r| r.dump()).collect()
    }

    /// Build a record from a field-to-value mapping
    fn load(map: Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}

impl<R> Schema for R where R: Record + Serialize + DeserializeOwned {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodArgs, Module, Version};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_dump_mirrors_columns() {
        let version = Version::new("1.0.0", "winecountry");
        let dumped = version.dump().unwrap();
        assert_eq!(dumped["version_code"], json!("1.0.0"));
        assert_eq!(dumped["version_name"], json!("winecountry"));
        assert_eq!(dumped["created"], Value::Null);

        let mut keys: Vec<_> = dumped.keys().map(String::as_str).collect();
        let mut columns = Version::COLUMNS.to_vec();
        keys.sort();
        columns.sort();
        assert_eq!(keys, columns);
    }

    #[test]
    fn test_dump_timestamp() {
        let created = Utc.with_ymd_and_hms(2020, 5, 1, 12, 0, 0).unwrap();
        let module = Module::new(1, "WineModule", "1.0.0").with_created(created);
        let dumped = module.dump().unwrap();
        assert_eq!(dumped["created"], json!("2020-05-01T12:00:00Z"));
        assert_eq!(Module::load(dumped).unwrap(), module);
    }

    #[test]
    fn test_mixed_default_values() {
        let args = vec![
            MethodArgs::new(1, "firstarg", 1).with_default(1337),
            MethodArgs::new(2, "secondarg", 1).with_default("OMG"),
        ];
        let dumped = MethodArgs::dump_many(&args).unwrap();
        assert_eq!(dumped[0]["default_value"], json!(1337));
        assert_eq!(dumped[1]["default_value"], json!("OMG"));
    }

    #[test]
    fn test_load_is_strict() {
        let mut map = Version::new("1.0.0", "winecountry").dump().unwrap();
        map.insert("codename".to_string(), json!("merlot"));
        assert!(Version::load(map).is_err());
    }

    #[test]
    fn test_load_missing_optional() {
        let map = json!({"version_code": "2.0.0", "version_name": "winecountry2"});
        let Value::Object(map) = map else { unreachable!() };
        let version = Version::load(map).unwrap();
        assert_eq!(version.created, None);
    }
}

//! Seed fixtures
//!
//! A seed file is TOML with one array of tables per entity, using column
//! names as keys. Timestamps are RFC 3339 strings.
//!
//! ```toml
//! [[versions]]
//! version_code = "1.0.0"
//! version_name = "winecountry"
//!
//! [[modules]]
//! module_id = 1
//! module_name = "WineModule"
//! version_id = "1.0.0"
//! created = "2020-05-01T12:00:00Z"
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::model::{Class, DataType, Method, MethodArgs, Module, Version};
use crate::storage::{DbStats, SqliteStore};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub types: Vec<DataType>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub arguments: Vec<MethodArgs>,
}

impl SeedFile {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Row counts this file would insert
    pub fn counts(&self) -> DbStats {
        DbStats {
            versions: self.versions.len(),
            modules: self.modules.len(),
            classes: self.classes.len(),
            methods: self.methods.len(),
            arguments: self.arguments.len(),
            types: self.types.len(),
        }
    }

    /// Insert every row, parents before children, in one transaction.
    ///
    /// Nothing is kept if any row is rejected.
    pub fn apply(&self, store: &mut SqliteStore) -> Result<DbStats> {
        store.begin_transaction()?;
        if let Err(e) = self.insert_rows(store) {
            tracing::warn!("Seeding failed, rolling back: {}", e);
            store.rollback()?;
            return Err(e);
        }
        store.commit()?;

        let counts = self.counts();
        tracing::info!(
            versions = counts.versions,
            modules = counts.modules,
            classes = counts.classes,
            methods = counts.methods,
            arguments = counts.arguments,
            types = counts.types,
            "Seeded database"
        );
        Ok(counts)
    }

    fn insert_rows(&self, store: &SqliteStore) -> Result<()> {
        store.insert_all(&self.versions)?;
        store.insert_all(&self.types)?;
        store.insert_all(&self.modules)?;
        store.insert_all(&self.classes)?;
        store.insert_all(&self.methods)?;
        store.insert_all(&self.arguments)?;
        Ok(())
    }
}

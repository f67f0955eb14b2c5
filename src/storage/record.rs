//! Row mapping between entity records and their tables

use rusqlite::{Row, ToSql};
use crate::model::{Class, DataType, EntityKind, Method, MethodArgs, Module, Version};

/// A many-to-one link from a table to the table its foreign key points at.
///
/// Carries the target's columns and relations so filters can walk
/// `classes -> modules -> versions` without knowing the concrete types.
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    /// Name used in filters (`"module"`, `"version"`)
    pub name: &'static str,
    /// Foreign key column on the owning table
    pub column: &'static str,
    pub table: &'static str,
    /// Column on the target table the foreign key references
    pub key: &'static str,
    pub columns: &'static [&'static str],
    pub relations: &'static [Relation],
}

impl Relation {
    pub const fn to<R: Record>(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            table: R::TABLE,
            key: R::PRIMARY_KEY,
            columns: R::COLUMNS,
            relations: R::RELATIONS,
        }
    }
}

/// A record persisted in its own table.
///
/// `COLUMNS` lists every column in the order `from_row` reads them and
/// `values` binds them.
pub trait Record: Sized {
    const KIND: EntityKind;
    const TABLE: &'static str;
    const PRIMARY_KEY: &'static str;
    const COLUMNS: &'static [&'static str];
    const RELATIONS: &'static [Relation] = &[];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn values(&self) -> Vec<&dyn ToSql>;

    fn has_column(column: &str) -> bool {
        Self::COLUMNS.contains(&column)
    }
}

impl Record for Version {
    const KIND: EntityKind = EntityKind::Version;
    const TABLE: &'static str = "versions";
    const PRIMARY_KEY: &'static str = "version_code";
    const COLUMNS: &'static [&'static str] = &["version_code", "version_name", "created"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Version {
            version_code: row.get(0)?,
            version_name: row.get(1)?,
            created: row.get(2)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.version_code as &dyn ToSql,
            &self.version_name as &dyn ToSql,
            &self.created as &dyn ToSql,
        ]
    }
}

impl Record for DataType {
    const KIND: EntityKind = EntityKind::Type;
    const TABLE: &'static str = "types";
    const PRIMARY_KEY: &'static str = "type_id";
    const COLUMNS: &'static [&'static str] = &["type_id", "type_name"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(DataType {
            type_id: row.get(0)?,
            type_name: row.get(1)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![&self.type_id as &dyn ToSql, &self.type_name as &dyn ToSql]
    }
}

impl Record for Module {
    const KIND: EntityKind = EntityKind::Module;
    const TABLE: &'static str = "modules";
    const PRIMARY_KEY: &'static str = "module_id";
    const COLUMNS: &'static [&'static str] = &["module_id", "module_name", "created", "version_id"];
    const RELATIONS: &'static [Relation] = &[Relation::to::<Version>("version", "version_id")];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Module {
            module_id: row.get(0)?,
            module_name: row.get(1)?,
            created: row.get(2)?,
            version_id: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.module_id as &dyn ToSql,
            &self.module_name as &dyn ToSql,
            &self.created as &dyn ToSql,
            &self.version_id as &dyn ToSql,
        ]
    }
}

impl Record for Class {
    const KIND: EntityKind = EntityKind::Class;
    const TABLE: &'static str = "classes";
    const PRIMARY_KEY: &'static str = "class_id";
    const COLUMNS: &'static [&'static str] = &["class_id", "class_name", "description", "module_id"];
    const RELATIONS: &'static [Relation] = &[Relation::to::<Module>("module", "module_id")];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Class {
            class_id: row.get(0)?,
            class_name: row.get(1)?,
            description: row.get(2)?,
            module_id: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.class_id as &dyn ToSql,
            &self.class_name as &dyn ToSql,
            &self.description as &dyn ToSql,
            &self.module_id as &dyn ToSql,
        ]
    }
}

impl Record for Method {
    const KIND: EntityKind = EntityKind::Method;
    const TABLE: &'static str = "methods";
    const PRIMARY_KEY: &'static str = "method_id";
    const COLUMNS: &'static [&'static str] = &[
        "method_id",
        "method_name",
        "human_test_coverage",
        "fuzzer_test_coverage",
        "description",
        "created",
        "class_id",
        "version_id",
    ];
    const RELATIONS: &'static [Relation] = &[
        Relation::to::<Class>("class", "class_id"),
        Relation::to::<Version>("version", "version_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Method {
            method_id: row.get(0)?,
            method_name: row.get(1)?,
            human_test_coverage: row.get(2)?,
            fuzzer_test_coverage: row.get(3)?,
            description: row.get(4)?,
            created: row.get(5)?,
            class_id: row.get(6)?,
            version_id: row.get(7)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.method_id as &dyn ToSql,
            &self.method_name as &dyn ToSql,
            &self.human_test_coverage as &dyn ToSql,
            &self.fuzzer_test_coverage as &dyn ToSql,
            &self.description as &dyn ToSql,
            &self.created as &dyn ToSql,
            &self.class_id as &dyn ToSql,
            &self.version_id as &dyn ToSql,
        ]
    }
}

impl Record for MethodArgs {
    const KIND: EntityKind = EntityKind::MethodArgs;
    const TABLE: &'static str = "method_args";
    const PRIMARY_KEY: &'static str = "argument_id";
    const COLUMNS: &'static [&'static str] = &[
        "argument_id",
        "argument_name",
        "description",
        "default_value",
        "method_id",
        "type_id",
    ];
    const RELATIONS: &'static [Relation] = &[
        Relation::to::<Method>("method", "method_id"),
        Relation::to::<DataType>("type", "type_id"),
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(MethodArgs {
            argument_id: row.get(0)?,
            argument_name: row.get(1)?,
            description: row.get(2)?,
            default_value: row.get(3)?,
            method_id: row.get(4)?,
            type_id: row.get(5)?,
        })
    }

    fn values(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.argument_id as &dyn ToSql,
            &self.argument_name as &dyn ToSql,
            &self.description as &dyn ToSql,
            &self.default_value as &dyn ToSql,
            &self.method_id as &dyn ToSql,
            &self.type_id as &dyn ToSql,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_carries_target_shape() {
        let module = &Class::RELATIONS[0];
        assert_eq!(module.table, "modules");
        assert_eq!(module.key, "module_id");
        assert_eq!(module.relations[0].name, "version");
        assert_eq!(module.relations[0].key, "version_code");
    }

    #[test]
    fn test_values_match_columns() {
        let method = Method::new(1, "method1", 1);
        assert_eq!(method.values().len(), Method::COLUMNS.len());
        let arg = MethodArgs::new(1, "firstarg", 1);
        assert_eq!(arg.values().len(), MethodArgs::COLUMNS.len());
        assert!(Version::has_column("version_name"));
        assert!(!Version::has_column("version_name; DROP TABLE versions"));
    }
}

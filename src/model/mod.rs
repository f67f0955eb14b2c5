//! Entity records
//!
//! The catalogue tracks six tables:
//! - `Version`: a released version of the code base
//! - `Module`: a module shipped in a version
//! - `Class`: a class defined in a module
//! - `Method`: a method of a class, with human and fuzzer test coverage
//! - `MethodArgs`: the arguments a method takes
//! - `DataType`: lookup table of argument types

pub mod class;
pub mod data_type;
pub mod method;
pub mod method_args;
pub mod module;
pub mod version;

pub use class::Class;
pub use data_type::DataType;
pub use method::Method;
pub use method_args::MethodArgs;
pub use module::Module;
pub use version::Version;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The entity tables known to the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Version,
    Module,
    Class,
    Method,
    MethodArgs,
    Type,
}

impl EntityKind {
    /// Get the string representation of the entity kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Version => "version",
            EntityKind::Module => "module",
            EntityKind::Class => "class",
            EntityKind::Method => "method",
            EntityKind::MethodArgs => "method_args",
            EntityKind::Type => "type",
        }
    }

    /// Table backing this entity
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Version => "versions",
            EntityKind::Module => "modules",
            EntityKind::Class => "classes",
            EntityKind::Method => "methods",
            EntityKind::MethodArgs => "method_args",
            EntityKind::Type => "types",
        }
    }

    /// All kinds, parents before children
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Version,
            EntityKind::Type,
            EntityKind::Module,
            EntityKind::Class,
            EntityKind::Method,
            EntityKind::MethodArgs,
        ]
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "version" | "versions" => Ok(EntityKind::Version),
            "module" | "modules" => Ok(EntityKind::Module),
            "class" | "classes" => Ok(EntityKind::Class),
            "method" | "methods" => Ok(EntityKind::Method),
            "method_args" | "args" | "arg" | "argument" | "arguments" => Ok(EntityKind::MethodArgs),
            "type" | "types" => Ok(EntityKind::Type),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in EntityKind::all() {
            let parsed: EntityKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!(EntityKind::from_str("classes").unwrap(), EntityKind::Class);
        assert_eq!(EntityKind::from_str("Arguments").unwrap(), EntityKind::MethodArgs);
        assert_eq!(EntityKind::from_str("types").unwrap(), EntityKind::Type);
    }

    #[test]
    fn test_unknown_kind() {
        let err = EntityKind::from_str("hashmap").unwrap_err();
        assert!(matches!(err, Error::UnknownKind(ref k) if k == "hashmap"));
    }

    #[test]
    fn test_parents_listed_first() {
        let order = EntityKind::all();
        let pos = |k| order.iter().position(|x| *x == k).unwrap();
        assert!(pos(EntityKind::Version) < pos(EntityKind::Module));
        assert!(pos(EntityKind::Module) < pos(EntityKind::Class));
        assert!(pos(EntityKind::Class) < pos(EntityKind::Method));
        assert!(pos(EntityKind::Type) < pos(EntityKind::MethodArgs));
        assert!(pos(EntityKind::Method) < pos(EntityKind::MethodArgs));
    }
}

//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - versions(version_code, version_name, created)
//! - modules(module_id, module_name, created, version_id -> versions)
//! - classes(class_id, class_name, description, module_id -> modules)
//! - methods(method_id, method_name, coverage, description, created, class_id -> classes, version_id -> versions)
//! - method_args(argument_id, argument_name, description, default_value, method_id -> methods, type_id -> types)
//! - types(type_id, type_name)

pub mod record;
pub mod schema;
pub mod sqlite;

pub use record::{Record, Relation};
pub use sqlite::{DbStats, SqliteStore};

//! # Grape - code base catalogue
//!
//! Records which versions of a code base exist, the modules, classes and
//! methods each version ships, the arguments of every method and how well
//! each method is covered by hand-written tests and by fuzzing.
//!
//! Grape provides:
//! - Plain entity records (`Version`, `Module`, `Class`, `Method`, `MethodArgs`, `DataType`)
//! - SQLite-backed storage with enforced foreign keys
//! - Exact-match and related-entity (`has`) filters
//! - Field/value serializers for every record
//! - TOML seed fixtures, a CLI and a read-only HTTP API

pub mod model;
pub mod serializer;
pub mod storage;
pub mod query;
pub mod seed;
pub mod commands;
pub mod config;
pub mod server;
pub mod ui;

// Re-exports for convenient access
pub use model::{Class, DataType, EntityKind, Method, MethodArgs, Module, Version};
pub use query::{version_filter, Filter, Query};
pub use serializer::Schema;
pub use storage::{Record, SqliteStore};

/// Result type alias for Grape operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Grape operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown column '{column}' on table {table}")]
    UnknownColumn { table: &'static str, column: String },

    #[error("Unknown relation '{relation}' on table {table}")]
    UnknownRelation { table: &'static str, relation: String },

    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),
}

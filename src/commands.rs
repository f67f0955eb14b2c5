//! CLI command bodies
//!
//! Each command works on an open store and returns what it found or changed;
//! rendering stays in `main`.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::config::{self, GrapeConfig};
use crate::model::{Class, DataType, EntityKind, Method, MethodArgs, Module, Version};
use crate::query::{version_filter, Filter};
use crate::serializer::Schema;
use crate::storage::SqliteStore;

/// Rows of one table, dumped to field/value maps
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub kind: EntityKind,
    pub columns: &'static [&'static str],
    pub rows: Vec<Map<String, Value>>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, in row order
    pub fn column(&self, name: &str) -> Vec<&Value> {
        self.rows.iter().filter_map(|row| row.get(name)).collect()
    }
}

/// What `init` wrote
#[derive(Debug)]
pub struct InitReport {
    pub config_path: PathBuf,
    pub gitignore_updated: bool,
}

/// `grape list <kind> [--version-code] [--limit]`
pub fn list(
    store: &SqliteStore,
    kind: EntityKind,
    version_code: Option<&str>,
    limit: Option<usize>,
) -> anyhow::Result<Listing> {
    let mut filters = Vec::new();
    if let Some(code) = version_code {
        match version_filter(kind, code) {
            Some(f) => filters.push(f),
            None => anyhow::bail!("{} rows are not tied to a version", kind),
        }
    }
    Ok(select(store, kind, filters, limit)?)
}

/// `grape find <kind> --field --value`
///
/// The value is bound as text. Integer and real columns convert it through
/// their affinity, text columns compare it as typed.
pub fn find(store: &SqliteStore, kind: EntityKind, field: &str, value: &str) -> crate::Result<Listing> {
    select(store, kind, vec![Filter::eq(field, value.to_string())], None)
}

/// `grape clear [kind]`: one table, or every table children first
pub fn clear(store: &SqliteStore, kind: Option<EntityKind>) -> crate::Result<usize> {
    let removed = match kind {
        Some(kind) => store.delete_kind(kind)?,
        None => store.clear_all()?,
    };
    tracing::info!(removed, "Cleared {}", kind.map_or("all tables", |k| k.table()));
    Ok(removed)
}

/// `grape init`: write the config and ignore the local database directory
pub fn init(project: &Path, config_path: Option<&Path>, force: bool) -> anyhow::Result<InitReport> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project.join(config::default_config_path()));
    let config = GrapeConfig {
        database: Some(config::default_database_path_in(Path::new(".")).display().to_string()),
        ..Default::default()
    };

    config::write_config(&config_path, &config, force)?;
    let gitignore_updated = config::ensure_gitignore(project)?;
    Ok(InitReport {
        config_path,
        gitignore_updated,
    })
}

fn select(
    store: &SqliteStore,
    kind: EntityKind,
    filters: Vec<Filter>,
    limit: Option<usize>,
) -> crate::Result<Listing> {
    match kind {
        EntityKind::Version => rows::<Version>(store, filters, limit),
        EntityKind::Module => rows::<Module>(store, filters, limit),
        EntityKind::Class => rows::<Class>(store, filters, limit),
        EntityKind::Method => rows::<Method>(store, filters, limit),
        EntityKind::MethodArgs => rows::<MethodArgs>(store, filters, limit),
        EntityKind::Type => rows::<DataType>(store, filters, limit),
    }
}

fn rows<R: Schema>(
    store: &SqliteStore,
    filters: Vec<Filter>,
    limit: Option<usize>,
) -> crate::Result<Listing> {
    let mut query = filters
        .into_iter()
        .fold(store.query::<R>(), |query, filter| query.filter(filter));
    if let Some(n) = limit {
        query = query.limit(n);
    }
    Ok(Listing {
        kind: R::KIND,
        columns: R::COLUMNS,
        rows: R::dump_many(&query.all()?)?,
    })
}

//! SQLite storage implementation

use std::path::Path;
use std::time::Duration;
use rusqlite::Connection;
use rusqlite::types::Value;
use serde::Serialize;
use crate::Result;
use crate::model::{Class, DataType, EntityKind, Method, MethodArgs, Module, Version};
use crate::query::{Filter, Query};
use super::record::Record;
use super::schema;

/// Default busy timeout for new connections
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// SQLite-backed session over the catalogue tables
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open a database file with an explicit busy timeout
    pub fn open_with_timeout(path: &Path, busy_timeout_ms: u64) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Opened database {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Enable foreign keys and create the tables
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Smoke test: the connection answers a trivial query
    pub fn is_connected(&self) -> bool {
        self.conn
            .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }

    /// Whether foreign key enforcement is active on this connection
    pub fn foreign_keys_enabled(&self) -> Result<bool> {
        let enabled: i64 = self.conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(enabled == 1)
    }

    fn insert_sql<R: Record>() -> String {
        let placeholders = (1..=R::COLUMNS.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders
        )
    }

    // ========== Row Operations ==========

    /// Insert a single row
    pub fn insert<R: Record>(&self, record: &R) -> Result<()> {
        self.conn
            .execute(&Self::insert_sql::<R>(), record.values().as_slice())?;
        Ok(())
    }

    /// Insert many rows.
    ///
    /// Runs in its own transaction unless one is already open, in which case
    /// the rows join it and land on the caller's `commit`.
    pub fn insert_all<R: Record>(&self, records: &[R]) -> Result<usize> {
        let sql = Self::insert_sql::<R>();

        if !self.conn.is_autocommit() {
            let mut stmt = self.conn.prepare_cached(&sql)?;
            for record in records {
                stmt.execute(record.values().as_slice())?;
            }
            return Ok(records.len());
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(&sql)?;
            for record in records {
                stmt.execute(record.values().as_slice())?;
            }
        }
        tx.commit()?;
        tracing::debug!(table = R::TABLE, rows = records.len(), "bulk insert");
        Ok(records.len())
    }

    /// Start a filtered query over `R`'s table
    pub fn query<R: Record>(&self) -> Query<'_, R> {
        Query::new(self)
    }

    /// All rows of `R`'s table in rowid order
    pub fn all<R: Record>(&self) -> Result<Vec<R>> {
        self.query::<R>().all()
    }

    /// All rows whose `column` equals `value`
    pub fn find_by<R: Record>(&self, column: &str, value: impl Into<Value>) -> Result<Vec<R>> {
        self.query::<R>().filter_by(column, value).all()
    }

    /// First row whose `column` equals `value`
    pub fn first_by<R: Record>(&self, column: &str, value: impl Into<Value>) -> Result<Option<R>> {
        self.query::<R>().filter_by(column, value).first()
    }

    /// Row by primary key
    pub fn get<R: Record>(&self, key: impl Into<Value>) -> Result<Option<R>> {
        self.first_by::<R>(R::PRIMARY_KEY, key)
    }

    /// Count rows of `R`'s table
    pub fn count<R: Record>(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", R::TABLE), [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete every row of `R`'s table, returning how many were removed.
    ///
    /// Fails while rows of a child table still reference this one.
    pub fn delete_all<R: Record>(&self) -> Result<usize> {
        let removed = self.conn.execute(&format!("DELETE FROM {}", R::TABLE), [])?;
        tracing::debug!(table = R::TABLE, removed, "delete all");
        Ok(removed)
    }

    /// Count rows for a kind chosen at runtime
    pub fn count_kind(&self, kind: EntityKind) -> Result<usize> {
        match kind {
            EntityKind::Version => self.count::<Version>(),
            EntityKind::Module => self.count::<Module>(),
            EntityKind::Class => self.count::<Class>(),
            EntityKind::Method => self.count::<Method>(),
            EntityKind::MethodArgs => self.count::<MethodArgs>(),
            EntityKind::Type => self.count::<DataType>(),
        }
    }

    /// Delete every row for a kind chosen at runtime
    pub fn delete_kind(&self, kind: EntityKind) -> Result<usize> {
        match kind {
            EntityKind::Version => self.delete_all::<Version>(),
            EntityKind::Module => self.delete_all::<Module>(),
            EntityKind::Class => self.delete_all::<Class>(),
            EntityKind::Method => self.delete_all::<Method>(),
            EntityKind::MethodArgs => self.delete_all::<MethodArgs>(),
            EntityKind::Type => self.delete_all::<DataType>(),
        }
    }

    // ========== Relation Queries ==========

    /// Modules shipped in a version
    pub fn modules_in_version(&self, version_code: &str) -> Result<Vec<Module>> {
        self.find_by::<Module>("version_id", version_code.to_string())
    }

    /// Classes defined in a module
    pub fn classes_in_module(&self, module_id: i64) -> Result<Vec<Class>> {
        self.find_by::<Class>("module_id", module_id)
    }

    /// Classes whose module belongs to a version
    pub fn classes_in_version(&self, version_code: &str) -> Result<Vec<Class>> {
        self.query::<Class>()
            .filter(Filter::has(
                "module",
                Filter::has("version", Filter::eq("version_code", version_code.to_string())),
            ))
            .all()
    }

    /// Methods of a class
    pub fn methods_in_class(&self, class_id: i64) -> Result<Vec<Method>> {
        self.find_by::<Method>("class_id", class_id)
    }

    /// Methods recorded in a version
    pub fn methods_in_version(&self, version_code: &str) -> Result<Vec<Method>> {
        self.query::<Method>()
            .filter(Filter::has("version", Filter::eq("version_code", version_code.to_string())))
            .all()
    }

    /// Arguments of a method
    pub fn arguments_of(&self, method_id: i64) -> Result<Vec<MethodArgs>> {
        self.find_by::<MethodArgs>("method_id", method_id)
    }

    // ========== Bulk Operations ==========

    /// Begin a transaction for bulk operations
    pub fn begin_transaction(&mut self) -> Result<()> {
        self.conn.execute("BEGIN TRANSACTION", [])?;
        Ok(())
    }

    /// Commit a transaction
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute("COMMIT", [])?;
        Ok(())
    }

    /// Rollback a transaction
    pub fn rollback(&mut self) -> Result<()> {
        self.conn.execute("ROLLBACK", [])?;
        Ok(())
    }

    /// Delete all data, children before parents
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for kind in EntityKind::all().iter().rev() {
            removed += self.delete_kind(*kind)?;
        }
        Ok(removed)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            versions: self.count::<Version>()?,
            modules: self.count::<Module>()?,
            classes: self.count::<Class>()?,
            methods: self.count::<Method>()?,
            arguments: self.count::<MethodArgs>()?,
            types: self.count::<DataType>()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub versions: usize,
    pub modules: usize,
    pub classes: usize,
    pub methods: usize,
    pub arguments: usize,
    pub types: usize,
}

impl DbStats {
    /// Label/count pairs in display order
    pub fn rows(&self) -> [(&'static str, usize); 6] {
        [
            ("Versions", self.versions),
            ("Modules", self.modules),
            ("Classes", self.classes),
            ("Methods", self.methods),
            ("Arguments", self.arguments),
            ("Types", self.types),
        ]
    }
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        for (label, count) in self.rows() {
            writeln!(f, "  {}: {}", label, count)?;
        }
        Ok(())
    }
}

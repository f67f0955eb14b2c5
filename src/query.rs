//! Filtered queries over a single table
//!
//! Provides:
//! - Exact column matches (`Filter::eq`)
//! - Related-entity matches through a foreign key (`Filter::has`), rendered
//!   as nested `EXISTS` sub-queries so they compose to any depth
//! - Conjunctions (`Filter::and`)
//!
//! Column and relation names are checked against the record definitions
//! before any SQL is built; only values are bound as parameters.

use std::marker::PhantomData;
use rusqlite::types::Value;
use crate::{Error, Result};
use crate::model::EntityKind;
use crate::storage::{Record, Relation, SqliteStore};

/// A predicate on the rows of one table.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Column equals value (`NULL` matches `NULL`)
    Eq { column: String, value: Value },
    /// The row the named relation points at satisfies the inner filter
    Has { relation: String, filter: Box<Filter> },
    /// Every filter holds
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn has(relation: impl Into<String>, filter: Filter) -> Self {
        Filter::Has {
            relation: relation.into(),
            filter: Box::new(filter),
        }
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    /// Render this filter as a SQL boolean expression over `alias`.
    fn render(
        &self,
        table: &'static str,
        alias: &str,
        columns: &[&str],
        relations: &[Relation],
        depth: usize,
        params: &mut Vec<Value>,
    ) -> Result<String> {
        match self {
            Filter::Eq { column, value } => {
                if !columns.contains(&column.as_str()) {
                    return Err(Error::UnknownColumn {
                        table,
                        column: column.clone(),
                    });
                }
                if *value == Value::Null {
                    return Ok(format!("{alias}.{column} IS NULL"));
                }
                params.push(value.clone());
                Ok(format!("{alias}.{column} = ?"))
            }
            Filter::Has { relation, filter } => {
                let rel = relations
                    .iter()
                    .find(|r| r.name == relation.as_str())
                    .ok_or_else(|| Error::UnknownRelation {
                        table,
                        relation: relation.clone(),
                    })?;
                let inner_alias = format!("t{}", depth + 1);
                let inner = filter.render(
                    rel.table,
                    &inner_alias,
                    rel.columns,
                    rel.relations,
                    depth + 1,
                    params,
                )?;
                Ok(format!(
                    "EXISTS (SELECT 1 FROM {table} AS {inner_alias} WHERE {inner_alias}.{key} = {alias}.{column} AND {inner})",
                    table = rel.table,
                    key = rel.key,
                    column = rel.column,
                ))
            }
            Filter::And(filters) => {
                if filters.is_empty() {
                    return Ok("1 = 1".to_string());
                }
                let parts = filters
                    .iter()
                    .map(|f| f.render(table, alias, columns, relations, depth, params))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", parts.join(" AND ")))
            }
        }
    }
}

/// Filter selecting the rows of `kind` that belong to a version.
///
/// Types are not versioned, so there is no filter for them.
pub fn version_filter(kind: EntityKind, version_code: &str) -> Option<Filter> {
    let code = Filter::eq("version_code", version_code.to_string());
    match kind {
        EntityKind::Version => Some(code),
        EntityKind::Module => Some(Filter::has("version", code)),
        EntityKind::Class => Some(Filter::has("module", Filter::has("version", code))),
        EntityKind::Method => Some(Filter::has("version", code)),
        EntityKind::MethodArgs => Some(Filter::has("method", Filter::has("version", code))),
        EntityKind::Type => None,
    }
}

/// A query over the table of `R`, built up with filters and run against a store.
///
/// Rows come back in rowid order: primary-key order for the integer-keyed
/// tables, insertion order for `versions`.
pub struct Query<'a, R: Record> {
    store: &'a SqliteStore,
    filters: Vec<Filter>,
    limit: Option<usize>,
    _record: PhantomData<R>,
}

impl<'a, R: Record> Query<'a, R> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self {
            store,
            filters: Vec::new(),
            limit: None,
            _record: PhantomData,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Shorthand for `filter(Filter::eq(column, value))`
    pub fn filter_by(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Filter::eq(column, value))
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build the `WHERE` clause (empty when unfiltered) and its parameters
    fn where_clause(&self) -> Result<(String, Vec<Value>)> {
        let mut params = Vec::new();
        if self.filters.is_empty() {
            return Ok((String::new(), params));
        }
        let parts = self
            .filters
            .iter()
            .map(|f| f.render(R::TABLE, "t0", R::COLUMNS, R::RELATIONS, 0, &mut params))
            .collect::<Result<Vec<_>>>()?;
        Ok((format!(" WHERE {}", parts.join(" AND ")), params))
    }

    fn select_sql(&self, limit: Option<usize>) -> Result<(String, Vec<Value>)> {
        let (clause, params) = self.where_clause()?;
        let columns = R::COLUMNS
            .iter()
            .map(|c| format!("t0.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut sql = format!(
            "SELECT {columns} FROM {table} AS t0{clause} ORDER BY t0.rowid",
            table = R::TABLE
        );
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }
        Ok((sql, params))
    }

    /// All matching rows
    pub fn all(&self) -> Result<Vec<R>> {
        let (sql, params) = self.select_sql(self.limit)?;
        tracing::debug!(table = R::TABLE, %sql, "select");
        let mut stmt = self.store.conn().prepare(&sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| R::from_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// First matching row, `None` when nothing matches
    pub fn first(&self) -> Result<Option<R>> {
        let (sql, params) = self.select_sql(Some(1))?;
        tracing::debug!(table = R::TABLE, %sql, "select first");
        let mut stmt = self.store.conn().prepare(&sql)?;
        let mut rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| R::from_row(row))?;
        Ok(rows.next().transpose()?)
    }

    /// Number of matching rows
    pub fn count(&self) -> Result<usize> {
        let (clause, params) = self.where_clause()?;
        let sql = format!("SELECT COUNT(*) FROM {} AS t0{clause}", R::TABLE);
        let count: i64 = self
            .store
            .conn()
            .query_row(&sql, rusqlite::params_from_iter(params.iter()), |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete every matching row, returning how many were removed
    pub fn delete(&self) -> Result<usize> {
        let (clause, params) = self.where_clause()?;
        let sql = format!(
            "DELETE FROM {table} WHERE rowid IN (SELECT t0.rowid FROM {table} AS t0{clause})",
            table = R::TABLE
        );
        tracing::debug!(table = R::TABLE, %sql, "delete");
        let removed = self
            .store
            .conn()
            .execute(&sql, rusqlite::params_from_iter(params.iter()))?;
        Ok(removed)
    }
}

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Value};
use std::sync::Arc;
use crate::model::{Class, DataType, Method, MethodArgs, Module, Version};
use crate::query::Filter;
use crate::serializer::Schema;
use crate::server::AppState;
use crate::storage::{DbStats, SqliteStore};
use crate::Error;

type Row = Map<String, Value>;
type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Deserialize, Default)]
pub struct ListParams {
    pub version_code: Option<String>,
    pub module_id: Option<i64>,
    pub class_id: Option<i64>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (status, Json(ErrorResponse { error: error.to_string() }))
}

/// Malformed path segments and query strings get the JSON error body too
fn bad_request(rejection: impl std::fmt::Display) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, rejection)
}

fn from_store_error(e: Error) -> ApiError {
    match e {
        Error::UnknownColumn { .. } | Error::UnknownRelation { .. } | Error::UnknownKind(_) => {
            api_error(StatusCode::BAD_REQUEST, e)
        }
        other => api_error(StatusCode::INTERNAL_SERVER_ERROR, other),
    }
}

/// Run `f` against a fresh connection on the blocking pool
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&SqliteStore) -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let path = state.database_path.clone();
    let busy_timeout_ms = state.busy_timeout_ms;
    tokio::task::spawn_blocking(move || {
        let store = SqliteStore::open_with_timeout(&path, busy_timeout_ms)?;
        f(&store)
    })
    .await
    .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?
    .map_err(from_store_error)
}

fn list<R: Schema>(store: &SqliteStore, filters: Vec<Filter>) -> crate::Result<Vec<Row>> {
    let query = filters
        .into_iter()
        .fold(store.query::<R>(), |query, filter| query.filter(filter));
    R::dump_many(&query.all()?)
}

fn one<R: Schema>(store: &SqliteStore, key: SqlValue) -> crate::Result<Option<Row>> {
    store.get::<R>(key)?.map(|r| r.dump()).transpose()
}

fn found(row: Option<Row>, what: String) -> Result<Json<Row>, ApiError> {
    row.map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("{} not found", what)))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<DbStats>, ApiError> {
    let stats = with_store(&state, |store| store.stats()).await?;
    Ok(Json(stats))
}

pub async fn list_versions(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = with_store(&state, |store| list::<Version>(store, Vec::new())).await?;
    Ok(Json(rows))
}

pub async fn get_version(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Row>, ApiError> {
    let key = SqlValue::Text(code.clone());
    let row = with_store(&state, move |store| one::<Version>(store, key)).await?;
    found(row, format!("version {}", code))
}

pub async fn list_modules(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let Query(params) = params.map_err(bad_request)?;
    let mut filters = Vec::new();
    if let Some(code) = params.version_code {
        filters.push(Filter::eq("version_id", code));
    }
    let rows = with_store(&state, move |store| list::<Module>(store, filters)).await?;
    Ok(Json(rows))
}

pub async fn list_classes(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let Query(params) = params.map_err(bad_request)?;
    let mut filters = Vec::new();
    if let Some(module_id) = params.module_id {
        filters.push(Filter::eq("module_id", module_id));
    }
    if let Some(code) = params.version_code {
        filters.push(Filter::has(
            "module",
            Filter::has("version", Filter::eq("version_code", code)),
        ));
    }
    let rows = with_store(&state, move |store| list::<Class>(store, filters)).await?;
    Ok(Json(rows))
}

pub async fn list_methods(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let Query(params) = params.map_err(bad_request)?;
    let mut filters = Vec::new();
    if let Some(class_id) = params.class_id {
        filters.push(Filter::eq("class_id", class_id));
    }
    if let Some(code) = params.version_code {
        filters.push(Filter::has("version", Filter::eq("version_code", code)));
    }
    let rows = with_store(&state, move |store| list::<Method>(store, filters)).await?;
    Ok(Json(rows))
}

pub async fn get_method(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Row>, ApiError> {
    let Path(id) = id.map_err(bad_request)?;
    let row = with_store(&state, move |store| one::<Method>(store, SqlValue::Integer(id))).await?;
    found(row, format!("method {}", id))
}

pub async fn list_arguments(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let Path(id) = id.map_err(bad_request)?;
    let rows = with_store(&state, move |store| {
        if store.get::<Method>(id)?.is_none() {
            return Ok(None);
        }
        list::<MethodArgs>(store, vec![Filter::eq("method_id", id)]).map(Some)
    })
    .await?;
    rows.map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("method {} not found", id)))
}

pub async fn list_types(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Row>>, ApiError> {
    let rows = with_store(&state, |store| list::<DataType>(store, Vec::new())).await?;
    Ok(Json(rows))
}

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod routes;

/// Server state
pub struct AppState {
    pub database_path: PathBuf,
    pub busy_timeout_ms: u64,
}

/// Read-only JSON API over the catalogue
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/stats", get(routes::get_stats))
        .route("/versions", get(routes::list_versions))
        .route("/versions/{code}", get(routes::get_version))
        .route("/modules", get(routes::list_modules))
        .route("/classes", get(routes::list_classes))
        .route("/methods", get(routes::list_methods))
        .route("/methods/{id}", get(routes::get_method))
        .route("/methods/{id}/arguments", get(routes::list_arguments))
        .route("/types", get(routes::list_types))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = build_router(Arc::new(state));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub mod api;
pub mod config;
pub mod errors;

use std::path::Path;
use std::sync::Arc;

use activities_core::ActivityRegistry;
use config::Config;
use errors::ServerResult;
use axum::{
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub struct AppState {
    pub registry: ActivityRegistry,
}

impl AppState {
    pub fn new(registry: ActivityRegistry) -> Self {
        Self { registry }
    }

    pub fn seeded() -> Self {
        Self::new(ActivityRegistry::seeded())
    }
}

pub fn build_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/static/index.html") }))
        .route("/activities", get(api::list_activities))
        .route("/activities/:activity/signup", post(api::signup))
        .route("/activities/:activity/participants", delete(api::unregister))
        .route("/health", get(|| async { "OK" }))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config.bind` and serves until the server fails.
pub async fn run(config: &Config, state: Arc<AppState>) -> ServerResult<()> {
    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| {
            tracing::error!(%e, addr = %config.bind, "Failed to bind");
            e
        })?;

    tracing::info!("Starting activities server on {}", config.bind);

    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!(%e, addr = %config.bind, "Server error");
        e
    })?;

    Ok(())
}

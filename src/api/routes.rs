//! HTTP route assembly.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::intent::IntentPipeline;
use crate::llm::GeminiClient;
use crate::tasks::{FileTaskStore, TaskStore};

use super::{admin, assistant, auth};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn TaskStore>,
    pub pipeline: IntentPipeline,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store: Arc<dyn TaskStore> = Arc::new(FileTaskStore::new(&config.data_dir)?);

    let oracle = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        Duration::from_secs(config.oracle_timeout_secs),
    )?);

    let pipeline = IntentPipeline::new(oracle, Arc::clone(&store));

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        pipeline,
    });

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/tasks/ai", post(assistant::handle))
        .route("/api/admin/users", get(admin::list_users))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

use crate::{AppState, types::HealthResponse};
use axum::{Json, extract::State};

/// Report liveness plus the configured model and search provider
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.pipeline.model_name().to_string(),
        search_provider: state.pipeline.search_tools().provider_name().to_string(),
    })
}

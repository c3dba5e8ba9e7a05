use crate::{
    AppState,
    types::{ResearchRequest, ResearchResponse, Result},
};
use axum::{Json, extract::State};
use chrono::Utc;
use std::time::Instant;

/// Run the research pipeline for a query
///
/// Stage failures do not fail the request; they are reported inside the
/// result fields and its `errors` list. Only an empty query is rejected.
pub async fn research(
    State(state): State<AppState>,
    Json(payload): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>> {
    let start = Instant::now();

    let result = state.pipeline.run(&payload.query).await?;

    let duration = start.elapsed();

    Ok(Json(ResearchResponse {
        result,
        duration_ms: duration.as_millis() as u64,
        completed_at: Utc::now(),
    }))
}

use crate::{
    AppState,
    types::{AppError, CompareRequest, CompareResponse, Result},
};
use axum::{Json, extract::State};

/// Search for comparisons between two products
pub async fn compare(
    State(state): State<AppState>,
    Json(payload): Json<CompareRequest>,
) -> Result<Json<CompareResponse>> {
    if payload.product_a.trim().is_empty() || payload.product_b.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Both product_a and product_b are required".to_string(),
        ));
    }

    let (comparison, hits) = state
        .pipeline
        .search_tools()
        .comparison_report(&payload.product_a, &payload.product_b, payload.max_results)
        .await;

    Ok(Json(CompareResponse {
        product_a: payload.product_a,
        product_b: payload.product_b,
        comparison,
        hits,
    }))
}

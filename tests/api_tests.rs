mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::mocks::{MockLLMClient, MockSearchProvider, hit};
use pricewise::{
    AppState, ProductSearchTools, ResearchPipeline,
    api::routes,
    utils::toml_config::{PricewiseConfig, SearchConfig},
};
use serde_json::json;
use std::sync::Arc;

/// Create a test server around mock collaborators
fn create_test_server(llm: MockLLMClient, search: MockSearchProvider) -> TestServer {
    let search = ProductSearchTools::new(Arc::new(search), &SearchConfig::default());
    let state = AppState {
        config: Arc::new(PricewiseConfig::default()),
        pipeline: Arc::new(ResearchPipeline::new(Arc::new(llm), search)),
    };
    TestServer::new(routes::app(state)).expect("Failed to create test server")
}

fn default_server() -> TestServer {
    create_test_server(
        MockLLMClient::scripted(&[r#"{"product":"e-reader"}"#, "ANALYSIS", "RECS", "CHART"]),
        MockSearchProvider::new(
            vec![hit("E-reader review", "Great screen", "https://r.example", 0.9)],
            vec![hit("E-reader price", "$129", "https://p.example", 0.7)],
        ),
    )
}

// ============= Health Check Tests =============

#[tokio::test]
async fn test_health_check() {
    let server = default_server();

    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "mock-model");
    assert_eq!(body["search_provider"], "mock-search");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// ============= Research Tests =============

#[tokio::test]
async fn test_research_returns_full_result() {
    let server = default_server();

    let response = server
        .post("/api/research")
        .json(&json!({ "query": "best e-reader for travel" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["query"], "best e-reader for travel");
    assert_eq!(body["analysis"], "ANALYSIS");
    assert_eq!(body["recommendations"], "RECS");
    assert_eq!(body["comparison_chart"], "CHART");
    assert!(body["raw_data"]["reviews"]
        .as_str()
        .unwrap()
        .contains("E-reader review"));
    assert!(body["raw_data"]["prices"].as_str().unwrap().contains("$129"));
    assert_eq!(body["errors"], json!([]));
    assert!(body["duration_ms"].is_u64());
    assert!(body["completed_at"].is_string());
}

#[tokio::test]
async fn test_research_reports_stage_failures_with_ok_status() {
    let server = create_test_server(
        MockLLMClient::scripted(&["not json", "A", "R", "C"]),
        MockSearchProvider::failing(),
    );

    let response = server
        .post("/api/research")
        .json(&json!({ "query": "air fryer" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["user_needs"], "not json");
    assert_eq!(
        body["raw_data"]["reviews"],
        "Error searching reviews: Mock search failure"
    );
    assert_eq!(body["errors"][0]["stage"], "search_reviews");
    assert_eq!(body["errors"][1]["stage"], "search_prices");
    assert_eq!(body["errors"][1]["message"], "Mock search failure");
}

#[tokio::test]
async fn test_research_rejects_empty_query() {
    let server = default_server();

    let response = server
        .post("/api/research")
        .json(&json!({ "query": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Research query must not be empty");
}

#[tokio::test]
async fn test_research_requires_query_field() {
    let server = default_server();

    let response = server.post("/api/research").json(&json!({})).await;
    assert!(response.status_code().is_client_error());
}

// ============= Compare Tests =============

#[tokio::test]
async fn test_compare_returns_hits() {
    let search = MockSearchProvider::empty().with_other(vec![hit(
        "Kindle vs Kobo",
        "Kobo reads EPUB",
        "https://c.example",
        0.8,
    )]);
    let server = create_test_server(MockLLMClient::new("unused"), search);

    let response = server
        .post("/api/compare")
        .json(&json!({ "product_a": "Kindle", "product_b": "Kobo" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["product_a"], "Kindle");
    assert_eq!(body["hits"][0]["title"], "Kindle vs Kobo");
    assert!(body["comparison"]
        .as_str()
        .unwrap()
        .contains("\"url\": \"https://c.example\""));
}

#[tokio::test]
async fn test_compare_search_failure_is_reported_in_body() {
    let server = create_test_server(MockLLMClient::new("unused"), MockSearchProvider::failing());

    let response = server
        .post("/api/compare")
        .json(&json!({ "product_a": "Kindle", "product_b": "Kobo", "max_results": 2 }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["comparison"],
        "Error searching comparisons: Mock search failure"
    );
    assert!(body.get("hits").is_none());
}

#[tokio::test]
async fn test_compare_rejects_blank_product() {
    let server = default_server();

    let response = server
        .post("/api/compare")
        .json(&json!({ "product_a": "Kindle", "product_b": "" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

mod common;

use common::mocks::{MockLLMClient, MockSearchProvider, hit};
use pricewise::research::{ResearchPipeline, StageName, UserNeeds};
use pricewise::tools::search::{ProductSearchTools, SearchDepth};
use pricewise::types::AppError;
use pricewise::utils::toml_config::SearchConfig;
use std::sync::Arc;

const INTENT: &str = r#"{"product":"4K monitor","needs":["budget"],"budget":"low","use_case":"general"}"#;

fn pipeline(llm: Arc<MockLLMClient>, search: Arc<MockSearchProvider>) -> ResearchPipeline {
    ResearchPipeline::new(llm, ProductSearchTools::new(search, &SearchConfig::default()))
}

fn monitor_search() -> MockSearchProvider {
    MockSearchProvider::new(
        vec![hit(
            "Budget 4K monitor review",
            "Sharp panel, weak stand",
            "https://reviews.example/monitor",
            0.92,
        )],
        vec![hit(
            "4K monitor deals",
            "$249 at Retailer A",
            "https://shop.example/monitor",
            0.81,
        )],
    )
}

#[tokio::test]
async fn test_budget_monitor_scenario() {
    let llm = Arc::new(MockLLMClient::scripted(&[
        INTENT,
        "ANALYSIS",
        "RECOMMENDATIONS",
        "COMPARISON",
    ]));
    let search = Arc::new(monitor_search());

    let result = pipeline(llm.clone(), search.clone())
        .run("best budget 4K monitor")
        .await
        .unwrap();

    assert_eq!(result.query, "best budget 4K monitor");
    let needs: serde_json::Value = serde_json::from_str(&result.user_needs).unwrap();
    assert_eq!(needs["product"], "4K monitor");

    let reviews: serde_json::Value = serde_json::from_str(&result.raw_data.reviews).unwrap();
    let prices: serde_json::Value = serde_json::from_str(&result.raw_data.prices).unwrap();
    assert_eq!(reviews.as_array().unwrap().len(), 1);
    assert_eq!(reviews[0]["title"], "Budget 4K monitor review");
    assert_eq!(reviews[0]["score"], 0.92);
    assert_eq!(prices.as_array().unwrap().len(), 1);
    assert_eq!(prices[0]["content"], "$249 at Retailer A");

    assert_eq!(result.analysis, "ANALYSIS");
    assert_eq!(result.recommendations, "RECOMMENDATIONS");
    assert_eq!(result.comparison_chart, "COMPARISON");
    assert!(result.errors.is_empty());

    // one interpreter call plus three generation calls
    assert_eq!(llm.prompts().len(), 4);

    let requests = search.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].query, "4K monitor reviews ratings pros cons");
    assert_eq!(
        requests[1].query,
        "4K monitor price buy online retailer comparison"
    );
    assert!(requests.iter().all(|r| r.max_results == 5));
    assert!(requests.iter().all(|r| r.depth == SearchDepth::Advanced));
}

#[tokio::test]
async fn test_later_prompts_carry_earlier_outputs() {
    let llm = Arc::new(MockLLMClient::scripted(&[
        INTENT,
        "ANALYSIS",
        "RECOMMENDATIONS",
        "COMPARISON",
    ]));

    pipeline(llm.clone(), Arc::new(monitor_search()))
        .run("best budget 4K monitor")
        .await
        .unwrap();

    let prompts = llm.prompts();
    assert!(prompts[0].contains("\"best budget 4K monitor\""));
    assert!(prompts[1].contains("Budget 4K monitor review"));
    assert!(prompts[1].contains("$249 at Retailer A"));
    assert!(prompts[1].contains("\"product\":\"4K monitor\""));
    assert!(prompts[2].contains("Based on this analysis: ANALYSIS"));
    assert!(prompts[3].contains("Analysis: ANALYSIS"));
    assert!(prompts[3].contains("Recommendations: RECOMMENDATIONS"));
}

#[tokio::test]
async fn test_every_collaborator_failing_still_completes() {
    let llm = Arc::new(MockLLMClient::failing());
    let search = Arc::new(MockSearchProvider::failing());

    let record = pipeline(llm.clone(), search.clone())
        .run_record("noise cancelling headphones")
        .await
        .unwrap();
    assert!(record.is_complete());

    let result = record.into_result();
    assert_eq!(
        result.user_needs,
        "Error understanding query: Mock LLM failure"
    );
    assert_eq!(
        result.raw_data.reviews,
        "Error searching reviews: Mock search failure"
    );
    assert_eq!(
        result.raw_data.prices,
        "Error searching prices: Mock search failure"
    );
    assert_eq!(result.analysis, "Error analyzing data: Mock LLM failure");
    assert_eq!(
        result.recommendations,
        "Error generating recommendations: Mock LLM failure"
    );
    assert_eq!(
        result.comparison_chart,
        "Error creating comparison: Mock LLM failure"
    );

    let failed: Vec<StageName> = result.errors.iter().map(|f| f.stage).collect();
    assert_eq!(failed, StageName::ALL.to_vec());

    // failed interpretation falls back to the original query
    assert_eq!(
        search.requests()[0].query,
        "noise cancelling headphones reviews ratings pros cons"
    );
    assert_eq!(llm.prompts().len(), 4);
}

#[tokio::test]
async fn test_search_failure_feeds_error_text_to_analysis() {
    let llm = Arc::new(MockLLMClient::scripted(&[INTENT, "ANALYSIS", "R", "C"]));

    let result = pipeline(llm.clone(), Arc::new(MockSearchProvider::failing()))
        .run("best budget 4K monitor")
        .await
        .unwrap();

    assert_eq!(
        result.raw_data.reviews,
        "Error searching reviews: Mock search failure"
    );
    assert_eq!(
        result.raw_data.prices,
        "Error searching prices: Mock search failure"
    );
    assert_eq!(result.analysis, "ANALYSIS");
    assert_eq!(result.comparison_chart, "C");
    assert_eq!(result.errors.len(), 2);

    let analysis_prompt = &llm.prompts()[1];
    assert!(analysis_prompt.contains("Reviews Data: Error searching reviews: Mock search failure"));
    assert!(analysis_prompt.contains("Prices Data: Error searching prices: Mock search failure"));
}

#[tokio::test]
async fn test_non_json_interpretation_kept_verbatim() {
    let raw = "The user wants a quiet mechanical keyboard under $100.";
    let llm = Arc::new(MockLLMClient::scripted(&[raw, "A", "R", "C"]));
    let search = Arc::new(MockSearchProvider::empty());

    let record = pipeline(llm, search.clone())
        .run_record("quiet mechanical keyboard")
        .await
        .unwrap();

    assert_eq!(
        record.user_needs().value(),
        Some(&UserNeeds::RawText(raw.to_string()))
    );
    assert_eq!(record.product_name(), "quiet mechanical keyboard");
    assert_eq!(record.into_result().user_needs, raw);
    assert_eq!(
        search.requests()[1].query,
        "quiet mechanical keyboard price buy online retailer comparison"
    );
}

#[tokio::test]
async fn test_intent_without_product_uses_query() {
    let llm = Arc::new(MockLLMClient::scripted(&[
        r#"{"needs":["quiet"],"budget":"$100"}"#,
        "A",
    ]));
    let search = Arc::new(MockSearchProvider::empty());

    pipeline(llm, search.clone())
        .run("quiet keyboard")
        .await
        .unwrap();

    assert_eq!(
        search.requests()[0].query,
        "quiet keyboard reviews ratings pros cons"
    );
}

#[tokio::test]
async fn test_same_query_same_result() {
    let run = || async {
        let llm = Arc::new(MockLLMClient::scripted(&[INTENT, "A", "R", "C"]));
        pipeline(llm, Arc::new(monitor_search()))
            .run("best budget 4K monitor")
            .await
            .unwrap()
    };

    let first = run().await;
    let second = run().await;
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn test_empty_query_rejected_before_any_call() {
    let llm = Arc::new(MockLLMClient::new("unused"));
    let search = Arc::new(MockSearchProvider::empty());
    let pipeline = pipeline(llm.clone(), search.clone());

    for query in ["", "   ", "\n\t"] {
        let err = pipeline.run(query).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
    assert!(llm.prompts().is_empty());
    assert!(search.requests().is_empty());
}

#[tokio::test]
async fn test_pipeline_serves_concurrent_runs() {
    let llm = Arc::new(MockLLMClient::new("SAME"));
    let pipeline = Arc::new(pipeline(llm, Arc::new(MockSearchProvider::empty())));

    let handles: Vec<_> = ["laptop", "tablet", "phone"]
        .into_iter()
        .map(|query| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.run(query).await })
        })
        .collect();

    for (handle, query) in handles.into_iter().zip(["laptop", "tablet", "phone"]) {
        let result = handle.await.unwrap().unwrap();
        assert_eq!(result.query, query);
        assert_eq!(result.user_needs, "SAME");
        assert_eq!(result.raw_data.reviews, "[]");
    }
}

#[test]
fn test_stage_order() {
    let names = pipeline(
        Arc::new(MockLLMClient::new("x")),
        Arc::new(MockSearchProvider::empty()),
    )
    .stage_names();

    assert_eq!(
        names,
        vec![
            StageName::UnderstandQuery,
            StageName::SearchReviews,
            StageName::SearchPrices,
            StageName::AnalyzeData,
            StageName::GenerateRecommendations,
            StageName::CreateComparison,
        ]
    );
}

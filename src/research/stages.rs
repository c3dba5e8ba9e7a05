//! The six pipeline stages.
//!
//! Each stage takes the record, writes exactly one field and hands the record
//! back. Collaborator failures are stored in that field, never returned.

use crate::llm::LLMClient;
use crate::research::prompts;
use crate::research::record::{ResearchRecord, StageName, StageOutcome, UserNeeds};
use crate::tools::search::ProductSearchTools;
use async_trait::async_trait;
use std::sync::Arc;

/// Collaborators shared by every stage of a pipeline
#[derive(Clone)]
pub struct StageContext {
    pub llm: Arc<dyn LLMClient>,
    pub search: ProductSearchTools,
}

/// One step of the research pipeline
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> StageName;

    async fn run(&self, ctx: &StageContext, record: ResearchRecord) -> ResearchRecord;
}

/// The fixed stage sequence
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(UnderstandQuery),
        Box::new(SearchReviews),
        Box::new(SearchPrices),
        Box::new(AnalyzeData),
        Box::new(GenerateRecommendations),
        Box::new(CreateComparison),
    ]
}

/// Extracts product, needs, budget and use case from the query
pub struct UnderstandQuery;

#[async_trait]
impl Stage for UnderstandQuery {
    fn name(&self) -> StageName {
        StageName::UnderstandQuery
    }

    async fn run(&self, ctx: &StageContext, mut record: ResearchRecord) -> ResearchRecord {
        let prompt = prompts::understand_query(record.query());
        let result = ctx.llm.generate(&prompt).await.map(UserNeeds::interpret);

        if let Ok(needs) = &result {
            match needs {
                UserNeeds::RawText(_) => {
                    tracing::info!("Query interpretation is not JSON, keeping raw text");
                }
                UserNeeds::Structured(_) if needs.product().is_none() => {
                    tracing::warn!(
                        "Structured intent has no usable `product`, searches fall back to the original query"
                    );
                }
                UserNeeds::Structured(_) => {}
            }
        }

        record
            .user_needs
            .fill(StageOutcome::from_result(self.name(), result));
        record
    }
}

/// Gathers review evidence for the product
pub struct SearchReviews;

#[async_trait]
impl Stage for SearchReviews {
    fn name(&self) -> StageName {
        StageName::SearchReviews
    }

    async fn run(&self, ctx: &StageContext, mut record: ResearchRecord) -> ResearchRecord {
        let result = ctx.search.search_product_reviews(record.product_name()).await;
        record
            .search_results
            .reviews
            .fill(StageOutcome::from_result(self.name(), result));
        record
    }
}

/// Gathers retailer price evidence for the product
pub struct SearchPrices;

#[async_trait]
impl Stage for SearchPrices {
    fn name(&self) -> StageName {
        StageName::SearchPrices
    }

    async fn run(&self, ctx: &StageContext, mut record: ResearchRecord) -> ResearchRecord {
        let result = ctx.search.search_product_prices(record.product_name()).await;
        record
            .search_results
            .prices
            .fill(StageOutcome::from_result(self.name(), result));
        record
    }
}

pub struct AnalyzeData;

#[async_trait]
impl Stage for AnalyzeData {
    fn name(&self) -> StageName {
        StageName::AnalyzeData
    }

    async fn run(&self, ctx: &StageContext, mut record: ResearchRecord) -> ResearchRecord {
        let prompt = prompts::analyze_data(
            &record.user_needs.render(),
            &record.search_results.reviews.render(),
            &record.search_results.prices.render(),
        );
        let result = ctx.llm.generate(&prompt).await;
        record
            .analysis
            .fill(StageOutcome::from_result(self.name(), result));
        record
    }
}

pub struct GenerateRecommendations;

#[async_trait]
impl Stage for GenerateRecommendations {
    fn name(&self) -> StageName {
        StageName::GenerateRecommendations
    }

    async fn run(&self, ctx: &StageContext, mut record: ResearchRecord) -> ResearchRecord {
        let prompt = prompts::generate_recommendations(
            &record.analysis.render(),
            &record.user_needs.render(),
        );
        let result = ctx.llm.generate(&prompt).await;
        record
            .recommendations
            .fill(StageOutcome::from_result(self.name(), result));
        record
    }
}

pub struct CreateComparison;

#[async_trait]
impl Stage for CreateComparison {
    fn name(&self) -> StageName {
        StageName::CreateComparison
    }

    async fn run(&self, ctx: &StageContext, mut record: ResearchRecord) -> ResearchRecord {
        let prompt = prompts::create_comparison(
            &record.analysis.render(),
            &record.recommendations.render(),
        );
        let result = ctx.llm.generate(&prompt).await;
        record
            .comparison_chart
            .fill(StageOutcome::from_result(self.name(), result));
        record
    }
}

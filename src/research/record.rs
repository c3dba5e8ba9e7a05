//! The per-run research record and the result it turns into.
//!
//! Every stage-owned field is a [`StageOutcome`]: `Pending` until its stage has
//! run, then either `Completed` with the produced value or `Failed` with a
//! [`StageFailure`]. A field is written once; later writes are ignored.

use crate::tools::search::{format_hits, SearchHit};
use crate::types::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// The six pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    UnderstandQuery,
    SearchReviews,
    SearchPrices,
    AnalyzeData,
    GenerateRecommendations,
    CreateComparison,
}

impl StageName {
    pub const ALL: [StageName; 6] = [
        StageName::UnderstandQuery,
        StageName::SearchReviews,
        StageName::SearchPrices,
        StageName::AnalyzeData,
        StageName::GenerateRecommendations,
        StageName::CreateComparison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::UnderstandQuery => "understand_query",
            StageName::SearchReviews => "search_reviews",
            StageName::SearchPrices => "search_prices",
            StageName::AnalyzeData => "analyze_data",
            StageName::GenerateRecommendations => "generate_recommendations",
            StageName::CreateComparison => "create_comparison",
        }
    }

    /// Leading text of the error string stored when this stage fails
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            StageName::UnderstandQuery => "Error understanding query",
            StageName::SearchReviews => "Error searching reviews",
            StageName::SearchPrices => "Error searching prices",
            StageName::AnalyzeData => "Error analyzing data",
            StageName::GenerateRecommendations => "Error generating recommendations",
            StageName::CreateComparison => "Error creating comparison",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stage's external call failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageFailure {
    pub stage: StageName,
    pub message: String,
}

impl StageFailure {
    pub fn new(stage: StageName, error: &AppError) -> Self {
        Self {
            stage,
            message: error.detail(),
        }
    }
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage.failure_prefix(), self.message)
    }
}

/// State of one stage-owned field
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Pending,
    Completed(T),
    Failed(StageFailure),
}

impl<T> Default for StageOutcome<T> {
    fn default() -> Self {
        StageOutcome::Pending
    }
}

impl<T> StageOutcome<T> {
    pub fn from_result(stage: StageName, result: crate::types::Result<T>) -> Self {
        match result {
            Ok(value) => StageOutcome::Completed(value),
            Err(e) => StageOutcome::Failed(StageFailure::new(stage, &e)),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, StageOutcome::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            StageOutcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&StageFailure> {
        match self {
            StageOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Write the outcome if the field is still pending
    pub(crate) fn fill(&mut self, outcome: StageOutcome<T>) {
        if self.is_pending() {
            *self = outcome;
        } else {
            tracing::warn!("Ignoring second write to an already populated record field");
        }
    }
}

/// Text form of a completed value, as fed into prompts and results
pub trait RenderText {
    fn render_text(&self) -> String;
}

impl RenderText for String {
    fn render_text(&self) -> String {
        self.clone()
    }
}

impl RenderText for Vec<SearchHit> {
    fn render_text(&self) -> String {
        format_hits(self)
    }
}

impl<T: RenderText> StageOutcome<T> {
    /// Completed value as text, the error string on failure, empty while pending
    pub fn render(&self) -> String {
        match self {
            StageOutcome::Pending => String::new(),
            StageOutcome::Completed(value) => value.render_text(),
            StageOutcome::Failed(failure) => failure.to_string(),
        }
    }
}

/// Interpreter output: parsed JSON or the model's raw text
#[derive(Debug, Clone, PartialEq)]
pub enum UserNeeds {
    Structured(Value),
    RawText(String),
}

impl UserNeeds {
    /// Try to parse the model response as JSON, keeping the raw text otherwise
    pub fn interpret(response: String) -> Self {
        match serde_json::from_str::<Value>(&response) {
            Ok(value) => UserNeeds::Structured(value),
            Err(_) => UserNeeds::RawText(response),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, UserNeeds::Structured(_))
    }

    /// The non-empty string `product` field of a structured JSON object
    pub fn product(&self) -> Option<&str> {
        match self {
            UserNeeds::Structured(Value::Object(map)) => map
                .get("product")
                .and_then(Value::as_str)
                .filter(|product| !product.trim().is_empty()),
            _ => None,
        }
    }
}

impl RenderText for UserNeeds {
    fn render_text(&self) -> String {
        match self {
            UserNeeds::Structured(value) => value.to_string(),
            UserNeeds::RawText(text) => text.clone(),
        }
    }
}

/// Evidence written by the two search stages
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub reviews: StageOutcome<Vec<SearchHit>>,
    pub prices: StageOutcome<Vec<SearchHit>>,
}

/// Mutable per-run state threaded through the pipeline
#[derive(Debug, Clone)]
pub struct ResearchRecord {
    run_id: Uuid,
    query: String,
    pub(crate) user_needs: StageOutcome<UserNeeds>,
    pub(crate) search_results: SearchResults,
    pub(crate) analysis: StageOutcome<String>,
    pub(crate) recommendations: StageOutcome<String>,
    pub(crate) comparison_chart: StageOutcome<String>,
}

impl ResearchRecord {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            query: query.into(),
            user_needs: StageOutcome::Pending,
            search_results: SearchResults::default(),
            analysis: StageOutcome::Pending,
            recommendations: StageOutcome::Pending,
            comparison_chart: StageOutcome::Pending,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn user_needs(&self) -> &StageOutcome<UserNeeds> {
        &self.user_needs
    }

    pub fn search_results(&self) -> &SearchResults {
        &self.search_results
    }

    pub fn analysis(&self) -> &StageOutcome<String> {
        &self.analysis
    }

    pub fn recommendations(&self) -> &StageOutcome<String> {
        &self.recommendations
    }

    pub fn comparison_chart(&self) -> &StageOutcome<String> {
        &self.comparison_chart
    }

    /// Product name the gatherer searches for: the interpreted `product` when
    /// there is one, the original query otherwise
    pub fn product_name(&self) -> &str {
        self.user_needs
            .value()
            .and_then(UserNeeds::product)
            .unwrap_or(self.query.as_str())
    }

    /// Failure recorded by the given stage, if any
    pub fn failure_for(&self, stage: StageName) -> Option<&StageFailure> {
        match stage {
            StageName::UnderstandQuery => self.user_needs.failure(),
            StageName::SearchReviews => self.search_results.reviews.failure(),
            StageName::SearchPrices => self.search_results.prices.failure(),
            StageName::AnalyzeData => self.analysis.failure(),
            StageName::GenerateRecommendations => self.recommendations.failure(),
            StageName::CreateComparison => self.comparison_chart.failure(),
        }
    }

    /// True once every stage-owned field has been written
    pub fn is_complete(&self) -> bool {
        !(self.user_needs.is_pending()
            || self.search_results.reviews.is_pending()
            || self.search_results.prices.is_pending()
            || self.analysis.is_pending()
            || self.recommendations.is_pending()
            || self.comparison_chart.is_pending())
    }

    /// Flatten into the serializable result handed to presentation layers
    pub fn into_result(self) -> ResearchResult {
        let errors = StageName::ALL
            .iter()
            .filter_map(|stage| self.failure_for(*stage).cloned())
            .collect();

        ResearchResult {
            user_needs: self.user_needs.render(),
            analysis: self.analysis.render(),
            recommendations: self.recommendations.render(),
            comparison_chart: self.comparison_chart.render(),
            raw_data: RawSearchData {
                reviews: self.search_results.reviews.render(),
                prices: self.search_results.prices.render(),
            },
            errors,
            query: self.query,
        }
    }
}

/// Search evidence as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSearchData {
    pub reviews: String,
    pub prices: String,
}

/// Final output of a research run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub query: String,
    pub user_needs: String,
    pub analysis: String,
    pub recommendations: String,
    pub comparison_chart: String,
    pub raw_data: RawSearchData,
    #[serde(default)]
    pub errors: Vec<StageFailure>,
}

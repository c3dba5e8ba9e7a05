//! Web search backed by the Tavily API
//!
//! [`SearchProvider`] is the seam the evidence gatherer talks to. [`TavilyClient`]
//! is the production implementation; tests substitute their own providers.
//! [`ProductSearchTools`] builds the product-specific queries on top of a provider.

use crate::types::{AppError, Result};
use crate::utils::toml_config::SearchConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

/// Provider-side search depth hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Basic => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }
}

/// A single search call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: usize,
    pub depth: SearchDepth,
}

/// A normalized search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub content: String,
    pub url: String,
    /// Relevance score on the provider's own scale
    pub score: f64,
}

/// Web search collaborator
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query and return normalized hits
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>>;

    /// Provider name for logs and health output
    fn name(&self) -> &str;
}

// ============= Tavily =============

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    content: Option<String>,
    url: Option<String>,
    score: Option<f64>,
}

impl From<TavilyResult> for SearchHit {
    fn from(raw: TavilyResult) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            score: raw.score.unwrap_or(0.0),
        }
    }
}

/// Tavily search API client
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
}

impl TavilyClient {
    pub fn new(api_key: String, api_base: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Search(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from the `[search]` section, resolving the API key
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(
            config.api_key()?,
            config.api_base.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.api_base);
        let body = json!({
            "query": request.query,
            "search_depth": request.depth.as_str(),
            "max_results": request.max_results,
        });

        tracing::debug!(query = %request.query, max_results = request.max_results, "Sending Tavily search");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Request to Tavily failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Search(format!(
                "HTTP {} from Tavily: {}",
                status, detail
            )));
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Invalid Tavily response: {}", e)))?;

        Ok(parsed.results.into_iter().map(SearchHit::from).collect())
    }

    fn name(&self) -> &str {
        "tavily"
    }
}

// ============= Product searches =============

/// Product-specific searches over a [`SearchProvider`]
#[derive(Clone)]
pub struct ProductSearchTools {
    provider: Arc<dyn SearchProvider>,
    max_results: usize,
    comparison_max_results: usize,
    depth: SearchDepth,
}

impl ProductSearchTools {
    pub fn new(provider: Arc<dyn SearchProvider>, config: &SearchConfig) -> Self {
        Self {
            provider,
            max_results: config.max_results,
            comparison_max_results: config.comparison_max_results,
            depth: config.depth,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn reviews_query(product: &str) -> String {
        format!("{} reviews ratings pros cons", product)
    }

    pub fn prices_query(product: &str) -> String {
        format!("{} price buy online retailer comparison", product)
    }

    pub fn comparison_query(product_a: &str, product_b: &str) -> String {
        format!("{} vs {} comparison review differences", product_a, product_b)
    }

    /// Search for product reviews and ratings
    pub async fn search_product_reviews(&self, product: &str) -> Result<Vec<SearchHit>> {
        self.run(Self::reviews_query(product), self.max_results).await
    }

    /// Search for product prices across retailers
    pub async fn search_product_prices(&self, product: &str) -> Result<Vec<SearchHit>> {
        self.run(Self::prices_query(product), self.max_results).await
    }

    /// Search for comparisons between two products. Not part of the pipeline.
    pub async fn search_product_comparisons(
        &self,
        product_a: &str,
        product_b: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<SearchHit>> {
        let limit = max_results
            .filter(|n| *n > 0)
            .unwrap_or(self.comparison_max_results);
        self.run(Self::comparison_query(product_a, product_b), limit)
            .await
    }

    /// Comparison search rendered the way the pipeline renders its evidence:
    /// pretty JSON on success, an error line on failure
    pub async fn comparison_report(
        &self,
        product_a: &str,
        product_b: &str,
        max_results: Option<usize>,
    ) -> (String, Option<Vec<SearchHit>>) {
        match self
            .search_product_comparisons(product_a, product_b, max_results)
            .await
        {
            Ok(hits) => (format_hits(&hits), Some(hits)),
            Err(e) => (
                format!("Error searching comparisons: {}", e.detail()),
                None,
            ),
        }
    }

    async fn run(&self, query: String, max_results: usize) -> Result<Vec<SearchHit>> {
        let request = SearchRequest {
            query,
            max_results,
            depth: self.depth,
        };
        self.provider.search(&request).await
    }
}

/// Serialize hits as two-space indented JSON
pub fn format_hits(hits: &[SearchHit]) -> String {
    serde_json::to_string_pretty(hits).unwrap_or_else(|_| "[]".to_string())
}

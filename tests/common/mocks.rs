//! Mock implementations for testing.
//!
//! This module provides mock LLM clients and search providers that can be
//! used across different test files without duplication.

#![allow(dead_code)]

use async_trait::async_trait;
use pricewise::llm::LLMClient;
use pricewise::tools::search::{SearchHit, SearchProvider, SearchRequest};
use pricewise::types::{AppError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock LLM client for testing with configurable responses.
///
/// Replies are handed out in order; once the script runs out the last reply
/// repeats. Every prompt is recorded.
///
/// # Examples
///
/// ```ignore
/// // Same reply for every call
/// let client = MockLLMClient::new("Hello, world!");
///
/// // One reply per pipeline stage
/// let client = MockLLMClient::scripted(&[r#"{"product":"x"}"#, "analysis", "recs", "chart"]);
///
/// // Always fails
/// let client = MockLLMClient::failing();
/// ```
pub struct MockLLMClient {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    should_fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self::scripted(&[response])
    }

    /// Create a mock client that returns the given responses in order.
    pub fn scripted(responses: &[&str]) -> Self {
        Self {
            replies: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            last: Mutex::new(String::new()),
            should_fail: false,
            prompts: Mutex::new(vec![]),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            last: Mutex::new(String::new()),
            should_fail: true,
            prompts: Mutex::new(vec![]),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.replies.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock search provider.
///
/// Answers review queries and price queries with separate hit lists, matched
/// on the query suffix the product search tools use.
pub struct MockSearchProvider {
    reviews: Vec<SearchHit>,
    prices: Vec<SearchHit>,
    other: Vec<SearchHit>,
    should_fail: bool,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearchProvider {
    pub fn new(reviews: Vec<SearchHit>, prices: Vec<SearchHit>) -> Self {
        Self {
            reviews,
            prices,
            other: vec![],
            should_fail: false,
            requests: Mutex::new(vec![]),
        }
    }

    /// Returns no hits for any query.
    pub fn empty() -> Self {
        Self::new(vec![], vec![])
    }

    /// Hits for anything that is neither a review nor a price query.
    pub fn with_other(mut self, hits: Vec<SearchHit>) -> Self {
        self.other = hits;
        self
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::empty()
        }
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        self.requests.lock().unwrap().push(request.clone());
        if self.should_fail {
            return Err(AppError::Search("Mock search failure".to_string()));
        }

        let hits = if request.query.ends_with("reviews ratings pros cons") {
            &self.reviews
        } else if request.query.ends_with("price buy online retailer comparison") {
            &self.prices
        } else {
            &self.other
        };
        Ok(hits.clone())
    }

    fn name(&self) -> &str {
        "mock-search"
    }
}

/// Build a search hit with the given fields.
pub fn hit(title: &str, content: &str, url: &str, score: f64) -> SearchHit {
    SearchHit {
        title: title.to_string(),
        content: content.to_string(),
        url: url.to_string(),
        score,
    }
}

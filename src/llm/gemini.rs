//! Google Gemini client over the `generateContent` REST endpoint.
//!
//! Auth is the `x-goog-api-key` header; the key never appears in a URL. The prompt is sent as a single user turn.

use crate::llm::client::{http_error, LLMClient};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            temperature,
        })
    }

    fn endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.temperature
            }
        })
    }

    /// Concatenate the text parts of the first candidate
    fn parse_response(body: &Value) -> Result<String> {
        let candidate = body["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .ok_or_else(|| AppError::LLM("No candidates in Gemini response".to_string()))?;

        let parts = candidate["content"]["parts"].as_array().ok_or_else(|| {
            let reason = candidate["finishReason"].as_str().unwrap_or("unknown");
            AppError::LLM(format!(
                "Gemini candidate has no content (finish reason: {})",
                reason
            ))
        })?;

        Ok(parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Gemini request");

        let response = self
            .client
            .post(self.endpoint_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                AppError::LLM(format!("Request to Gemini API failed: {}", e.without_url()))
            })?;

        if !response.status().is_success() {
            return Err(http_error("Gemini", response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::LLM(format!("Invalid JSON from Gemini: {}", e.without_url())))?;

        Self::parse_response(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

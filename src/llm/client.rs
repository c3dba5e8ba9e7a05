//! LLM Client abstractions and provider management
//!
//! This module provides a unified interface for the language-model collaborator:
//! - **Gemini**: Google Generative Language REST API (default)
//! - **OpenAI**: any OpenAI-compatible chat completions endpoint
//! - **Ollama**: local inference through an Ollama server (`ollama` feature)

use crate::types::{AppError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Generic LLM client trait for provider abstraction
///
/// The pipeline only ever sends one prompt and reads one text response, so this
/// is the whole contract. All providers implement it, and tests swap in mocks.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
///
/// Built from the `[llm]` section of `pricewise.toml` once secrets have been
/// resolved; see [`crate::utils::toml_config::LlmConfig::to_provider`].
#[derive(Debug, Clone)]
pub enum Provider {
    /// Google Gemini API provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Gemini {
    ///     api_key: "AIza...".to_string(),
    ///     api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
    ///     model: "gemini-2.0-flash-exp".to_string(),
    ///     temperature: 0.3,
    ///     timeout_secs: 120,
    /// };
    /// ```
    Gemini {
        api_key: String,
        api_base: String,
        model: String,
        temperature: f32,
        timeout_secs: u64,
    },

    /// OpenAI API provider (including Azure OpenAI and compatible APIs)
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
        temperature: f32,
        timeout_secs: u64,
    },

    /// Ollama local LLM provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "llama3.2".to_string(),
    /// };
    /// ```
    Ollama { base_url: String, model: String },
}

impl Provider {
    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, or if the provider
    /// was compiled out (Ollama without the `ollama` feature).
    pub async fn create_client(&self) -> Result<Arc<dyn LLMClient>> {
        match self {
            Provider::Gemini {
                api_key,
                api_base,
                model,
                temperature,
                timeout_secs,
            } => Ok(Arc::new(super::gemini::GeminiClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *temperature,
                std::time::Duration::from_secs(*timeout_secs),
            )?)),

            Provider::OpenAI {
                api_key,
                api_base,
                model,
                temperature,
                timeout_secs,
            } => Ok(Arc::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *temperature,
                std::time::Duration::from_secs(*timeout_secs),
            )?)),

            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Arc::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone()).await?,
            )),

            #[cfg(not(feature = "ollama"))]
            Provider::Ollama { model, .. } => Err(AppError::Configuration(format!(
                "Ollama provider requested for model '{}' but pricewise was built without the `ollama` feature",
                model
            ))),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini { .. } => "Gemini",
            Provider::OpenAI { .. } => "OpenAI",
            Provider::Ollama { .. } => "Ollama",
        }
    }

    /// Model identifier this provider will be asked to run
    pub fn model(&self) -> &str {
        match self {
            Provider::Gemini { model, .. }
            | Provider::OpenAI { model, .. }
            | Provider::Ollama { model, .. } => model,
        }
    }
}

/// Map a non-success HTTP response into an [`AppError::LLM`]
pub(crate) async fn http_error(provider: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AppError::LLM(format!("HTTP {} from {} API: {}", status, provider, body))
}

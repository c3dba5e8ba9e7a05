//! TOML-based configuration for Pricewise
//!
//! This module provides declarative configuration for the language-model
//! provider, the search provider, the HTTP server and the CLI output via a TOML
//! file (`pricewise.toml`).
//!
//! Secrets are never stored in the file. Providers reference the *name* of an
//! environment variable (`api_key_env`) which is resolved when a client is built.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::Provider;
use crate::tools::search::SearchDepth;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "pricewise.toml";

/// Root configuration structure loaded from pricewise.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PricewiseConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Language-model provider used by every pipeline stage
    #[serde(default)]
    pub llm: LlmConfig,

    /// Web search provider used by the evidence gatherer
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= LLM Provider Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LlmConfig {
    Gemini {
        /// Environment variable containing API key
        #[serde(default = "default_gemini_key_env")]
        api_key_env: String,
        #[serde(default = "default_gemini_base")]
        api_base: String,
        #[serde(default = "default_gemini_model")]
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default = "default_llm_timeout")]
        timeout_secs: u64,
    },
    OpenAI {
        /// Environment variable containing API key
        #[serde(default = "default_openai_key_env")]
        api_key_env: String,
        #[serde(default = "default_openai_base")]
        api_base: String,
        model: String,
        #[serde(default = "default_temperature")]
        temperature: f32,
        #[serde(default = "default_llm_timeout")]
        timeout_secs: u64,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        model: String,
    },
}

fn default_gemini_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_gemini_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_openai_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig::Gemini {
            api_key_env: default_gemini_key_env(),
            api_base: default_gemini_base(),
            model: default_gemini_model(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl LlmConfig {
    /// Short provider name, as written in the `type` key
    pub fn kind(&self) -> &'static str {
        match self {
            LlmConfig::Gemini { .. } => "gemini",
            LlmConfig::OpenAI { .. } => "openai",
            LlmConfig::Ollama { .. } => "ollama",
        }
    }

    /// Configured model identifier
    pub fn model(&self) -> &str {
        match self {
            LlmConfig::Gemini { model, .. }
            | LlmConfig::OpenAI { model, .. }
            | LlmConfig::Ollama { model, .. } => model,
        }
    }

    /// Resolve secrets from the environment and build a runtime [`Provider`]
    pub fn to_provider(&self) -> Result<Provider, ConfigError> {
        match self {
            LlmConfig::Gemini {
                api_key_env,
                api_base,
                model,
                temperature,
                timeout_secs,
            } => Ok(Provider::Gemini {
                api_key: resolve_env(api_key_env)?,
                api_base: api_base.clone(),
                model: model.clone(),
                temperature: *temperature,
                timeout_secs: *timeout_secs,
            }),
            LlmConfig::OpenAI {
                api_key_env,
                api_base,
                model,
                temperature,
                timeout_secs,
            } => Ok(Provider::OpenAI {
                api_key: resolve_env(api_key_env)?,
                api_base: api_base.clone(),
                model: model.clone(),
                temperature: *temperature,
                timeout_secs: *timeout_secs,
            }),
            LlmConfig::Ollama { base_url, model } => Ok(Provider::Ollama {
                base_url: base_url.clone(),
                model: model.clone(),
            }),
        }
    }
}

// ============= Search Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Environment variable containing the Tavily API key
    #[serde(default = "default_search_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_search_base")]
    pub api_base: String,

    /// Result bound for the review and price searches
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Result bound for the two-product comparison search
    #[serde(default = "default_comparison_max_results")]
    pub comparison_max_results: usize,

    #[serde(default)]
    pub depth: SearchDepth,

    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

fn default_search_key_env() -> String {
    "TAVILY_API_KEY".to_string()
}

fn default_search_base() -> String {
    "https://api.tavily.com".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_comparison_max_results() -> usize {
    3
}

fn default_search_timeout() -> u64 {
    30
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_search_key_env(),
            api_base: default_search_base(),
            max_results: default_max_results(),
            comparison_max_results: default_comparison_max_results(),
            depth: SearchDepth::default(),
            timeout_secs: default_search_timeout(),
        }
    }
}

impl SearchConfig {
    /// Resolve the search API key from the environment
    pub fn api_key(&self) -> Result<String, ConfigError> {
        resolve_env(&self.api_key_env)
    }
}

// ============= Output Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the CLI writes the JSON research result
    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,
}

fn default_results_path() -> PathBuf {
    PathBuf::from("research_results.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: default_results_path(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

fn resolve_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

impl PricewiseConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PricewiseConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate value ranges. Environment variables are checked lazily when
    /// clients are built, so `config` and `init` work without credentials.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::ValidationError(
                "search.max_results must be greater than 0".to_string(),
            ));
        }
        if self.search.comparison_max_results == 0 {
            return Err(ConfigError::ValidationError(
                "search.comparison_max_results must be greater than 0".to_string(),
            ));
        }
        if self.search.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "search.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.llm.model().trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.model must not be empty".to_string(),
            ));
        }

        match &self.llm {
            LlmConfig::Gemini {
                temperature,
                timeout_secs,
                ..
            }
            | LlmConfig::OpenAI {
                temperature,
                timeout_secs,
                ..
            } => {
                if !(0.0..=2.0).contains(temperature) {
                    return Err(ConfigError::ValidationError(format!(
                        "llm.temperature must be between 0 and 2, got {}",
                        temperature
                    )));
                }
                if *timeout_secs == 0 {
                    return Err(ConfigError::ValidationError(
                        "llm.timeout_secs must be greater than 0".to_string(),
                    ));
                }
            }
            LlmConfig::Ollama { .. } => {}
        }

        Ok(())
    }
}

//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for the language-model collaborator
//! used by every text-producing pipeline stage. Provider-specific details sit
//! behind the [`LLMClient`] trait so the pipeline works with any of them.
//!
//! # Supported Providers
//!
//! - Gemini - Google Generative Language API (default)
//! - OpenAI - OpenAI and compatible chat completions APIs
//! - Ollama - Local Ollama server (enable the `ollama` feature, on by default)
//!
//! # Example
//!
//! ```ignore
//! use pricewise::llm::Provider;
//!
//! let provider = config.llm.to_provider()?;
//! let client = provider.create_client().await?;
//!
//! let response = client.generate("What is 2+2?").await?;
//! println!("{}", response);
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// Google Gemini REST client.
pub mod gemini;
/// OpenAI-compatible chat completions client.
pub mod openai;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use client::{LLMClient, Provider};

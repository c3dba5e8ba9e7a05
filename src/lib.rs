//! # Pricewise - Product Research Pipeline
//!
//! Turns a free-text shopping question ("best budget 4K monitor") into a
//! structured research result: interpreted intent, review and price evidence
//! from web search, an analysis, purchase recommendations and a fixed-format
//! comparison chart.
//!
//! ## Overview
//!
//! Pricewise can be used in two ways:
//!
//! 1. **As a standalone tool** - Run the `pricewise` binary (`research`,
//!    `compare` and `serve` subcommands)
//! 2. **As a library** - Build a [`ResearchPipeline`] with your own
//!    [`LLMClient`] and [`SearchProvider`]
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use pricewise::{PricewiseConfig, ResearchPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PricewiseConfig::load("pricewise.toml")?;
//!     let pipeline = ResearchPipeline::from_config(&config).await?;
//!
//!     let result = pipeline.run("best budget 4K monitor").await?;
//!     println!("{}", result.comparison_chart);
//!     Ok(())
//! }
//! ```
//!
//! ### Custom Collaborators
//!
//! ```rust,ignore
//! use pricewise::{ProductSearchTools, ResearchPipeline, SearchConfig};
//! use std::sync::Arc;
//!
//! let search = ProductSearchTools::new(Arc::new(my_search), &SearchConfig::default());
//! let pipeline = ResearchPipeline::new(Arc::new(my_llm), search);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Command-line parsing and terminal output
//! - [`llm`] - LLM client implementations
//! - [`research`] - The research pipeline and its record
//! - [`tools`] - Web search collaborators
//! - [`types`] - Common types and error handling
//! - [`utils`] - TOML configuration

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Product research pipeline.
pub mod research;
/// Web search tools.
pub mod tools;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{LLMClient, Provider};
pub use research::{ResearchPipeline, ResearchRecord, ResearchResult, StageFailure, StageName};
pub use tools::search::{ProductSearchTools, SearchHit, SearchProvider, TavilyClient};
pub use types::{AppError, Result};
pub use utils::toml_config::{PricewiseConfig, SearchConfig};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Effective configuration
    pub config: Arc<PricewiseConfig>,
    /// Research pipeline shared by all requests
    pub pipeline: Arc<ResearchPipeline>,
}

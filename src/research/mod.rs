//! Product Research Pipeline
//!
//! This module turns a free-text shopping question into a research result by
//! running a fixed sequence of stages over a per-run [`ResearchRecord`].
//!
//! # Architecture
//!
//! - [`pipeline::ResearchPipeline`] - Runs the stages in order and owns the collaborators
//! - [`stages`] - One type per stage, all sharing the record-in/record-out [`stages::Stage`] trait
//! - [`record`] - The research record, stage outcomes and the serializable result
//! - [`prompts`] - Prompt templates for the language-model stages
//!
//! # Usage
//!
//! ```ignore
//! use pricewise::research::ResearchPipeline;
//!
//! let pipeline = ResearchPipeline::from_config(&config).await?;
//! let result = pipeline.run("best wireless headphones under $200").await?;
//!
//! println!("{}", result.comparison_chart);
//! for failure in &result.errors {
//!     eprintln!("{}", failure);
//! }
//! ```
//!
//! # Research Workflow
//!
//! 1. **Understand query** - Extract product, needs, budget and use case
//! 2. **Search reviews** - Review and rating evidence for the product
//! 3. **Search prices** - Retailer price evidence for the product
//! 4. **Analyze data** - Pros/cons, price range, sentiment, quality, value
//! 5. **Generate recommendations** - Buy verdict, retailer, alternatives, timing
//! 6. **Create comparison** - Fixed-format summary and decision matrix
//!
//! A failing collaborator never stops the run: the affected field holds the
//! failure and later stages still execute.

/// Stage sequencing.
pub mod pipeline;
/// Prompt templates.
pub mod prompts;
/// Research record and result types.
pub mod record;
/// Stage implementations.
pub mod stages;

pub use pipeline::ResearchPipeline;
pub use record::{
    RawSearchData, ResearchRecord, ResearchResult, StageFailure, StageName, StageOutcome,
    UserNeeds,
};

use crate::llm::LLMClient;
use crate::research::record::{ResearchRecord, ResearchResult, StageName};
use crate::research::stages::{default_stages, Stage, StageContext};
use crate::tools::search::{ProductSearchTools, TavilyClient};
use crate::types::{AppError, Result};
use crate::utils::toml_config::PricewiseConfig;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Runs the fixed research stage sequence for one query at a time.
///
/// The pipeline itself holds no per-run state, so one instance can serve
/// concurrent runs; each run owns its own [`ResearchRecord`].
pub struct ResearchPipeline {
    context: StageContext,
    stages: Vec<Box<dyn Stage>>,
}

impl ResearchPipeline {
    pub fn new(llm: Arc<dyn LLMClient>, search: ProductSearchTools) -> Self {
        Self {
            context: StageContext { llm, search },
            stages: default_stages(),
        }
    }

    /// Build the configured LLM provider and the Tavily client
    pub async fn from_config(config: &PricewiseConfig) -> Result<Self> {
        let provider = config.llm.to_provider()?;
        let llm = provider.create_client().await?;
        let tavily = TavilyClient::from_config(&config.search)?;
        let search = ProductSearchTools::new(Arc::new(tavily), &config.search);

        tracing::info!(
            provider = provider.name(),
            model = llm.model_name(),
            search = search.provider_name(),
            "Research pipeline ready"
        );

        Ok(Self::new(llm, search))
    }

    pub fn stage_names(&self) -> Vec<StageName> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub fn model_name(&self) -> &str {
        self.context.llm.model_name()
    }

    pub fn search_tools(&self) -> &ProductSearchTools {
        &self.context.search
    }

    /// Research a product query and return the flattened result
    pub async fn run(&self, query: &str) -> Result<ResearchResult> {
        Ok(self.run_record(query).await?.into_result())
    }

    /// Research a product query and return the populated record
    ///
    /// # Errors
    ///
    /// Only an empty or whitespace-only query is rejected. Collaborator
    /// failures are recorded in the affected fields and never returned.
    pub async fn run_record(&self, query: &str) -> Result<ResearchRecord> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Research query must not be empty".to_string(),
            ));
        }

        let record = ResearchRecord::new(query);
        let span = tracing::info_span!("research", run_id = %record.run_id());

        async move {
            tracing::info!(query, "Starting product research");
            let started = Instant::now();
            let total = self.stages.len();

            let mut record = record;
            for (index, stage) in self.stages.iter().enumerate() {
                let name = stage.name();
                tracing::info!(stage = %name, "Stage {}/{}", index + 1, total);

                let stage_started = Instant::now();
                record = stage.run(&self.context, record).await;
                let elapsed_ms = stage_started.elapsed().as_millis() as u64;

                match record.failure_for(name) {
                    Some(failure) => tracing::warn!(stage = %name, elapsed_ms, "{}", failure),
                    None => tracing::debug!(stage = %name, elapsed_ms, "Stage complete"),
                }
            }

            tracing::info!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Product research finished"
            );
            Ok(record)
        }
        .instrument(span)
        .await
    }
}

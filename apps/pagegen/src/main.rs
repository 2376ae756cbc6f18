mod classifier;
mod config;
mod errors;
mod generation;
mod llm_client;
mod pipeline;
mod research;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classifier::tiebreak::OpenAiTieBreak;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pipeline::work_items::default_work_items;
use crate::pipeline::Pipeline;
use crate::research::PerplexityClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pagegen v{}", env!("CARGO_PKG_VERSION"));

    // Each collaborator client is a plain value holding its credentials and
    // base settings — no process-wide singletons.
    let research = Arc::new(PerplexityClient::new(
        config.perplexity_api_key.clone(),
        config.search_context_size,
    ));
    info!(
        "Research client initialized (model: {}, search context: {:?})",
        research::SEARCH_MODEL,
        config.search_context_size
    );

    let generator = Arc::new(LlmClient::new(config.anthropic_api_key.clone()));
    info!("Generation client initialized (model: {})", llm_client::MODEL);

    let tie_break = Arc::new(OpenAiTieBreak::new(config.openai_api_key.clone()));

    let items = default_work_items();
    info!(
        "Processing {} work items into {}",
        items.len(),
        config.output_dir.display()
    );

    let pipeline = Pipeline::new(research, generator, tie_break, config.output_dir.clone());
    let summary = pipeline.run(&items).await;

    info!(
        "Run complete: {} generated, {} skipped, {} failed",
        summary.generated, summary.skipped, summary.failed
    );

    Ok(())
}

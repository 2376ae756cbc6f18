//! Template-Guided Generation Step — one extended-thinking call per page.
//!
//! The prompt embeds the knowledge backbone verbatim plus a worked JSON
//! example whose structure the model must copy exactly. Thinking content is
//! discarded; only the final text travels on to extraction.

use async_trait::async_trait;
use tracing::debug;

pub mod example;
pub mod extract;
pub mod prompts;

use crate::classifier::Language;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};

/// Output budget for a full page, thinking included.
pub const GENERATION_MAX_TOKENS: u32 = 6000;
/// Thinking budget, carved out of the output budget.
pub const THINKING_BUDGET: u32 = 3000;

/// Produces the raw (expected-JSON) page text for a topic. Behind a trait so
/// the driver can be tested without a network.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        topic: &str,
        knowledge_backbone: &str,
        language: Language,
    ) -> Result<String, LlmError>;
}

/// Builds the single all-sections generation prompt.
pub fn build_generation_prompt(topic: &str, knowledge_backbone: &str, language: Language) -> String {
    let cliches = prompts::CLICHE_PHRASES
        .iter()
        .map(|p| format!("'{p}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let icons = example::ICON_CHOICES.join(", ");

    prompts::GENERATION_PROMPT_TEMPLATE
        .replace("{language}", language.english_name())
        .replace("{topic}", topic)
        .replace("{backbone}", knowledge_backbone)
        .replace("{example}", example::PAGE_EXAMPLE)
        .replace("{icons}", &icons)
        .replace("{cliches}", &cliches)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}

#[async_trait]
impl ContentGenerator for LlmClient {
    async fn generate(
        &self,
        topic: &str,
        knowledge_backbone: &str,
        language: Language,
    ) -> Result<String, LlmError> {
        let prompt = build_generation_prompt(topic, knowledge_backbone, language);
        let output = self
            .query_with_thinking(
                &prompt,
                Some(prompts::PAGE_SYSTEM),
                GENERATION_MAX_TOKENS,
                THINKING_BUDGET,
            )
            .await?;

        debug!(
            "generation for '{}' used {} chars of thinking",
            topic,
            output.thinking.len()
        );

        Ok(output.response.trim().to_string())
    }
}

//! Research Step — fetches the knowledge backbone for a keyword.
//!
//! One search-augmented call to Perplexity per work item. Transport failures
//! surface as `SearchOutcome { success: false, .. }` values at the vendor
//! boundary; the typed `ResearchProvider` layer above turns empty or failed
//! results into a `ResearchError`, which is fatal for the current item.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::classifier::Language;

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
/// The only Perplexity model with web search capabilities we use.
pub const SEARCH_MODEL: &str = "sonar-pro";
/// Token budget for the knowledge backbone — enough for a factual summary,
/// small enough to keep the generation prompt lean.
const BACKBONE_MAX_TOKENS: u32 = 600;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// How much search context Perplexity gathers before answering.
/// Trades recall against token cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextSize {
    Low,
    Medium,
    High,
}

#[derive(Debug, PartialEq, Eq, Error)]
#[error("invalid search context size '{0}' (expected low, medium, or high)")]
pub struct InvalidContextSize(String);

impl FromStr for SearchContextSize {
    type Err = InvalidContextSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(SearchContextSize::Low),
            "medium" => Ok(SearchContextSize::Medium),
            "high" => Ok(SearchContextSize::High),
            other => Err(InvalidContextSize(other.to_string())),
        }
    }
}

/// Vendor-boundary result value. Failures are carried here, never unwound.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub success: bool,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl SearchOutcome {
    fn ok(content: String) -> Self {
        Self {
            success: true,
            content: Some(content),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            content: None,
            error: Some(error),
        }
    }
}

/// Empty or failed research result — fatal for the current work item.
#[derive(Debug, Error)]
#[error("no knowledge backbone for '{topic}': {reason}")]
pub struct ResearchError {
    pub topic: String,
    pub reason: String,
}

/// Produces the knowledge backbone for a topic. Behind a trait so the driver
/// can be tested without a network.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn research(&self, topic: &str, language: Language) -> Result<String, ResearchError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_search_options: Option<WebSearchOptions>,
}

#[derive(Debug, Serialize)]
struct WebSearchOptions {
    search_context_size: SearchContextSize,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for the Perplexity chat completions API.
#[derive(Clone)]
pub struct PerplexityClient {
    client: Client,
    api_key: String,
    search_context_size: SearchContextSize,
}

impl PerplexityClient {
    pub fn new(api_key: String, search_context_size: SearchContextSize) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            search_context_size,
        }
    }

    /// One search-augmented query. No retries — a failed search is reported
    /// as a failed outcome and the work item is dropped.
    pub async fn query_with_search(
        &self,
        prompt: &str,
        system: Option<&str>,
        max_tokens: u32,
    ) -> SearchOutcome {
        let request = ChatRequest {
            model: SEARCH_MODEL,
            messages: build_messages(prompt, system),
            temperature: 0.7,
            max_tokens: Some(max_tokens),
            web_search_options: Some(WebSearchOptions {
                search_context_size: self.search_context_size,
            }),
        };

        match self.send(&request).await {
            Ok(content) => SearchOutcome::ok(content),
            Err(e) => SearchOutcome::failed(format!("Perplexity search query error: {e}")),
        }
    }

    /// Plain (non-search) query with bounded retries and a fixed delay.
    /// Used for reasoning models whose output may carry `<think>` blocks.
    #[allow(dead_code)]
    pub async fn query(&self, prompt: &str, model: &str, max_tokens: Option<u32>) -> SearchOutcome {
        let request = ChatRequest {
            model,
            messages: build_messages(prompt, None),
            temperature: 0.7,
            max_tokens,
            web_search_options: None,
        };

        let mut last_error = String::new();
        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                warn!(
                    "Perplexity query attempt {} failed, retrying in {}s: {}",
                    attempt,
                    RETRY_DELAY.as_secs(),
                    last_error
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }

            match self.send(&request).await {
                Ok(content) => return SearchOutcome::ok(strip_thinking(&content).to_string()),
                Err(e) => last_error = e,
            }
        }

        SearchOutcome::failed(format!(
            "Perplexity query error after {MAX_RETRIES} attempts: {last_error}"
        ))
    }

    async fn send(&self, request: &ChatRequest<'_>) -> Result<String, String> {
        let response = self
            .client
            .post(PERPLEXITY_API_URL)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("status {status}: {body}"));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| e.to_string())?;
        debug!("Perplexity call succeeded");
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| "response carried no content".to_string())
    }
}

fn build_messages<'a>(prompt: &'a str, system: Option<&'a str>) -> Vec<ChatMessage<'a>> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });
    messages
}

/// Language-appropriate research instruction for a topic.
pub fn research_instruction(topic: &str, language: Language) -> String {
    match language {
        Language::En => format!(
            "Summarize the current facts, trends, and challenges about \"{topic}\". \
             Focus on concrete, up-to-date information. Do not use marketing language."
        ),
        Language::Es => format!(
            "Resume los datos, tendencias y desafíos actuales sobre \"{topic}\". \
             Céntrate en información concreta y actualizada. No utilices lenguaje de marketing."
        ),
    }
}

#[async_trait]
impl ResearchProvider for PerplexityClient {
    async fn research(&self, topic: &str, language: Language) -> Result<String, ResearchError> {
        let instruction = research_instruction(topic, language);
        let outcome = self
            .query_with_search(&instruction, None, BACKBONE_MAX_TOKENS)
            .await;

        let content = outcome.content.unwrap_or_default();
        if !outcome.success || content.trim().is_empty() {
            return Err(ResearchError {
                topic: topic.to_string(),
                reason: outcome
                    .error
                    .unwrap_or_else(|| "endpoint returned empty content".to_string()),
            });
        }

        Ok(content.trim().to_string())
    }
}

/// Removes a `<think>…</think>` block from reasoning-model output.
///
/// Prefers whatever follows the closing tag. When the model never leaves its
/// thinking block, falls back to the last concluding passage inside it.
#[allow(dead_code)]
pub fn strip_thinking(content: &str) -> &str {
    let Some(open) = content.find("<think>") else {
        return content;
    };
    let Some(close) = content.find("</think>") else {
        // Unterminated block — nothing reliable to salvage outside it.
        return content[..open].trim();
    };

    let after = content[close + "</think>".len()..].trim();
    if !after.is_empty() {
        return after;
    }

    let thinking = content[open + "<think>".len()..close].trim();
    const CONCLUSION_MARKERS: &[&str] = &[
        "In conclusion",
        "To summarize",
        "Therefore",
        "In summary",
        "Overall",
        "To conclude",
    ];
    for marker in CONCLUSION_MARKERS {
        if let Some(idx) = thinking.rfind(marker) {
            return thinking[idx..].trim();
        }
    }

    // No conclusion marker: take the last paragraph of the thinking block.
    thinking.rsplit("\n\n").next().unwrap_or(thinking).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_context_size_parses() {
        assert_eq!("low".parse(), Ok(SearchContextSize::Low));
        assert_eq!("medium".parse(), Ok(SearchContextSize::Medium));
        assert_eq!("high".parse(), Ok(SearchContextSize::High));
        assert!("huge".parse::<SearchContextSize>().is_err());
    }

    #[test]
    fn search_context_size_serializes_lowercase() {
        let options = WebSearchOptions {
            search_context_size: SearchContextSize::Medium,
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["search_context_size"], "medium");
    }

    #[test]
    fn research_instruction_follows_language() {
        let en = research_instruction("seo agency", Language::En);
        assert!(en.contains("seo agency"));
        assert!(en.contains("Do not use marketing language"));

        let es = research_instruction("agencia de marketing", Language::Es);
        assert!(es.contains("agencia de marketing"));
        assert!(es.contains("lenguaje de marketing"));
    }

    #[test]
    fn strip_thinking_prefers_text_after_closing_tag() {
        let content = "<think>working through it...</think>\nThe answer is 42.";
        assert_eq!(strip_thinking(content), "The answer is 42.");
    }

    #[test]
    fn strip_thinking_falls_back_to_conclusion_marker() {
        let content = "<think>Lots of steps.\n\nIn conclusion, growth is slowing.</think>";
        assert_eq!(strip_thinking(content), "In conclusion, growth is slowing.");
    }

    #[test]
    fn strip_thinking_falls_back_to_last_paragraph() {
        let content = "<think>first thoughts\n\nfinal synthesis here</think>";
        assert_eq!(strip_thinking(content), "final synthesis here");
    }

    #[test]
    fn strip_thinking_leaves_plain_text_alone() {
        assert_eq!(strip_thinking("no tags here"), "no tags here");
    }
}

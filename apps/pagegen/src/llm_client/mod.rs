/// LLM Client — the single point of entry for all Claude API calls in pagegen.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All generation-stage LLM interactions MUST go through this module.
/// (Research goes through `research::PerplexityClient`, the classifier
/// tie-break through `classifier::tiebreak` — each vendor has exactly one
/// wrapper.)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all generation calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-3-7-sonnet-20250219";
const MAX_RETRIES: u32 = 3;
/// Fixed delay between retry attempts. Retries are local to one request and
/// never escalate into a cross-item policy.
const RETRY_DELAY: std::time::Duration = std::time::Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking: Option<ThinkingConfig>,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    #[serde(rename = "type")]
    kind: &'static str,
    budget_tokens: u32,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
    thinking: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// The thinking and final-text halves of an extended-thinking response.
/// Callers in this pipeline discard `thinking`; it is surfaced only for
/// debug logging.
#[derive(Debug, Clone)]
pub struct ThinkingOutput {
    pub thinking: String,
    pub response: String,
}

/// Wraps the Anthropic Messages API with retry logic and extended thinking.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a single extended-thinking call to the Claude API.
    ///
    /// `thinking_budget` is carved out of `max_tokens`, so `max_tokens` must be
    /// strictly larger. Extended thinking requires temperature 1.0.
    /// Retries on 429 (rate limit) and 5xx errors with a fixed delay.
    pub async fn query_with_thinking(
        &self,
        prompt: &str,
        system: Option<&str>,
        max_tokens: u32,
        thinking_budget: u32,
    ) -> Result<ThinkingOutput, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens,
            temperature: 1.0,
            system,
            thinking: Some(ThinkingConfig {
                kind: "enabled",
                budget_tokens: thinking_budget,
            }),
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self.call_with_retries(&request_body).await?;

        debug!(
            "generation call succeeded: input_tokens={}, output_tokens={}",
            response.usage.input_tokens, response.usage.output_tokens
        );

        let mut thinking = String::new();
        let mut text = String::new();
        for block in &response.content {
            match block.block_type.as_str() {
                "thinking" => {
                    if let Some(t) = &block.thinking {
                        thinking.push_str(t);
                    }
                }
                "text" => {
                    if let Some(t) = &block.text {
                        text.push_str(t);
                    }
                }
                _ => {}
            }
        }

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        Ok(ThinkingOutput {
            thinking,
            response: text,
        })
    }

    async fn call_with_retries(
        &self,
        request_body: &AnthropicRequest<'_>,
    ) -> Result<AnthropicResponse, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    RETRY_DELAY.as_millis()
                );
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse the structured error message
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json().await?);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

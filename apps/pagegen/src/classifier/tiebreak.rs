//! LLM tie-break for the language classifier.
//!
//! One single-turn chat call with a constrained yes/no contract. Kept behind
//! a trait so the cascade can be exercised in tests without a network.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const TIEBREAK_MODEL: &str = "gpt-3.5-turbo";
/// The answer is one word; anything longer is noise.
const TIEBREAK_MAX_TOKENS: u32 = 5;

const TIEBREAK_SYSTEM: &str = "You are a language identification assistant. \
    Answer with exactly one word: 'yes' if the phrase is Spanish, 'no' if it is not. \
    No punctuation, no explanations.";

/// Network-backed yes/no language check.
///
/// `None` means inconclusive (ambiguous answer or transport failure); the
/// caller falls through to the remaining heuristic tiers. Implementations must
/// never return an error and never retry — one failed call is simply
/// inconclusive.
#[async_trait]
pub trait LanguageTieBreak: Send + Sync {
    async fn is_spanish(&self, keyword: &str) -> Option<bool>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
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

/// OpenAI-backed tie-break client.
#[derive(Clone)]
pub struct OpenAiTieBreak {
    client: Client,
    api_key: String,
}

impl OpenAiTieBreak {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn ask(&self, keyword: &str) -> Result<Option<String>, reqwest::Error> {
        let request = ChatRequest {
            model: TIEBREAK_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: TIEBREAK_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: keyword,
                },
            ],
            temperature: 0.0,
            max_tokens: TIEBREAK_MAX_TOKENS,
        };

        let response: ChatResponse = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.choices.into_iter().next().and_then(|c| c.message.content))
    }
}

#[async_trait]
impl LanguageTieBreak for OpenAiTieBreak {
    async fn is_spanish(&self, keyword: &str) -> Option<bool> {
        let content = match self.ask(keyword).await {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!("tie-break returned no content for '{keyword}'");
                return None;
            }
            Err(e) => {
                // Inconclusive by contract — the cascade keeps going.
                warn!("tie-break call failed for '{keyword}': {e}");
                return None;
            }
        };

        interpret_answer(&content)
    }
}

/// Maps the model's near-single-token answer onto the yes/no contract.
/// Anything other than a clear yes or no is inconclusive.
pub(crate) fn interpret_answer(content: &str) -> Option<bool> {
    let answer = content.trim().trim_end_matches('.').to_lowercase();
    match answer.as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_and_no_are_decisive() {
        assert_eq!(interpret_answer("yes"), Some(true));
        assert_eq!(interpret_answer("No."), Some(false));
        assert_eq!(interpret_answer("  YES  "), Some(true));
    }

    #[test]
    fn anything_else_is_inconclusive() {
        assert_eq!(interpret_answer(""), None);
        assert_eq!(interpret_answer("maybe"), None);
        assert_eq!(interpret_answer("yes, it is Spanish"), None);
    }
}

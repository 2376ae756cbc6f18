use thiserror::Error;

use crate::llm_client::LlmError;
use crate::research::ResearchError;

/// Errors that can fail the processing of a single work item.
/// The driver catches these, logs them, and moves on to the next item —
/// a malformed generation response is NOT one of them (it degrades into
/// an `ErrorContent` artifact instead, see `generation::extract`).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("research failed: {0}")]
    Research(#[from] ResearchError),

    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

// Shared prompt constants and prompt-building utilities.
// Each stage that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction fragment that enforces bare-JSON output.
/// Appended to every prompt whose response is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Do NOT wrap the JSON in a string or markdown code block. \
    Do NOT include ```json or any markdown formatting. \
    The output must be a valid JSON object only.";

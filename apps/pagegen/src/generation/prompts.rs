// All LLM prompt constants for the generation stage.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for service-page generation — brand voice and guardrails.
pub const PAGE_SYSTEM: &str = "You are writing a service page for Single Grain, \
    a digital marketing agency. \
    The content must be high quality, professional, and vanilla (no risky or exaggerated claims). \
    Do not make guarantees or risky promises. Maintain a confident, modern, and clear tone. \
    Do not generate testimonials.";

/// Phrases the model must not use anywhere in the page.
pub const CLICHE_PHRASES: &[&str] = &[
    "in today's world",
    "in today's digital landscape",
    "in today's fast-paced environment",
];

/// Generation prompt template.
/// Replace: {language}, {topic}, {backbone}, {example}, {icons}, {cliches},
///          {json_only}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"Write the entire output in {language}.

Here is some background information about the topic "{topic}":

{backbone}

Generate a complete service page for Single Grain, a digital marketing agency, about "{topic}".
Return a single JSON object with exactly the sections and structure of this example:

{example}

Copy the structure of the example exactly — same keys, same nesting, same inline markup conventions — but replace all text with new content about "{topic}", written in {language}.

For the "icon" field of each item in "why_us.highlights", choose only from this list: {icons}.

Each section should follow the style and structure of the provided example. Do not generate testimonials. Do not make risky or exaggerated claims.

IMPORTANT: Use simple, clear language, but do not skip marketing jargon where appropriate. Avoid typical AI cliches such as {cliches}, and similar phrases. {json_only}"#;

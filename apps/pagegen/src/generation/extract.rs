//! Tolerant JSON extraction — turns free-form LLM text into page content.
//!
//! `extract` never fails: malformed output degrades into the `Error` variant,
//! a recognized terminal state the driver persists like any other content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generation::example::DEFAULT_ICON;

/// The parse-failure terminal state: the failure message plus the original
/// text, kept verbatim so the artifact stays inspectable after the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorContent {
    pub error: String,
    pub raw: String,
}

/// Content of one generated page. Serialized untagged so artifacts carry
/// either the section tree or the `{error, raw}` object directly, nothing
/// wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageContent {
    Error(ErrorContent),
    Sections(Value),
}

/// Extracts page content from raw generation output.
///
/// If the text carries a triple-backtick marker anywhere, one leading
/// (optionally language-tagged) fence and one trailing fence are stripped
/// before parsing.
pub fn extract(raw_text: &str) -> PageContent {
    let cleaned = if raw_text.contains("```") {
        strip_json_fences(raw_text)
    } else {
        raw_text.trim()
    };

    match serde_json::from_str::<Value>(cleaned) {
        Ok(mut value) => {
            backfill_icons(&mut value);
            PageContent::Sections(value)
        }
        Err(e) => PageContent::Error(ErrorContent {
            error: format!("Failed to parse JSON: {e}"),
            raw: raw_text.to_string(),
        }),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Fills the default icon into any `why_us.highlights` item missing one.
/// Items that already carry an icon are untouched.
fn backfill_icons(content: &mut Value) {
    let Some(items) = content
        .pointer_mut("/why_us/highlights")
        .and_then(Value::as_array_mut)
    else {
        return;
    };

    for item in items {
        if let Value::Object(map) = item {
            let missing = matches!(map.get("icon"), None | Some(Value::Null));
            if missing {
                map.insert("icon".to_string(), Value::String(DEFAULT_ICON.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_json_parses_directly() {
        let content = extract(r#"{"hero": {"headline": "Grow"}}"#);
        assert_eq!(
            content,
            PageContent::Sections(json!({"hero": {"headline": "Grow"}}))
        );
    }

    #[test]
    fn extraction_is_idempotent_on_clean_json() {
        let text = r#"{"hero": {"headline": "Grow"}}"#;
        let first = extract(text);
        let PageContent::Sections(value) = &first else {
            panic!("expected sections");
        };
        let second = extract(&serde_json::to_string(value).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn strips_exactly_one_fence_pair() {
        let fenced = "```json\n{\"hero\": {\"headline\": \"Grow\"}}\n```";
        assert_eq!(extract(fenced), extract(r#"{"hero": {"headline": "Grow"}}"#));
    }

    #[test]
    fn strips_untagged_fences() {
        let fenced = "```\n{\"closing\": {\"cta\": \"Talk\"}}\n```";
        assert_eq!(
            extract(fenced),
            PageContent::Sections(json!({"closing": {"cta": "Talk"}}))
        );
    }

    #[test]
    fn never_fails_on_garbage_input() {
        for text in ["", "not json at all", "{\"truncated\": ", "```json\n{broken\n```"] {
            match extract(text) {
                PageContent::Error(err) => {
                    assert!(!err.error.is_empty());
                    assert_eq!(err.raw, text);
                }
                PageContent::Sections(_) => panic!("garbage parsed as sections: {text:?}"),
            }
        }
    }

    #[test]
    fn missing_icons_are_backfilled_and_present_ones_kept() {
        let text = r#"{
            "why_us": {
                "highlights": [
                    {"title": "A", "icon": "rocket"},
                    {"title": "B"},
                    {"title": "C", "icon": null}
                ]
            }
        }"#;
        let PageContent::Sections(value) = extract(text) else {
            panic!("expected sections");
        };
        let highlights = value["why_us"]["highlights"].as_array().unwrap();
        assert_eq!(highlights[0]["icon"], "rocket");
        assert_eq!(highlights[1]["icon"], DEFAULT_ICON);
        assert_eq!(highlights[2]["icon"], DEFAULT_ICON);
    }

    #[test]
    fn pages_without_highlights_pass_through() {
        let content = extract(r#"{"hero": {"headline": "Grow"}}"#);
        let PageContent::Sections(value) = content else {
            panic!("expected sections");
        };
        assert!(value.get("why_us").is_none());
    }

    #[test]
    fn error_content_round_trips_as_plain_object() {
        let content = PageContent::Error(ErrorContent {
            error: "Failed to parse JSON: oops".to_string(),
            raw: "not json".to_string(),
        });
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["error"], "Failed to parse JSON: oops");
        assert_eq!(json["raw"], "not json");

        let back: PageContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }
}

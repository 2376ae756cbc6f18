//! Language Classifier — decides whether a keyword is English or Spanish.
//!
//! First-match cascade from cheap/high-precision to expensive/lower-precision:
//! Spanish characters > high-confidence phrases > LLM tie-break >
//! medium-confidence phrases > general heuristic > default English.
//!
//! The tiers can disagree; first confident signal wins and no reconciliation
//! is attempted. The precedence order is load-bearing — do not reorder.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod tiebreak;

use tiebreak::LanguageTieBreak;

/// Target output language for one work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    /// English name of the language, for prompt wording.
    pub fn english_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
        }
    }
}

/// Letters and punctuation that only occur in Spanish keywords.
const SPANISH_CHARS: &str = "áéíóúüñ¿¡";

/// Unambiguous Spanish bigrams — safe to decide on without any further checks.
const HIGH_CONFIDENCE_PHRASES: &[&str] = &["agencia de"];

/// Common Spanish marketing/business phrases. Medium confidence: only
/// consulted after the LLM tie-break declined to decide.
const MEDIUM_CONFIDENCE_PHRASES: &[&str] = &[
    "marketing digital",
    "posicionamiento web",
    "redes sociales",
    "paginas web",
    "publicidad digital",
    "empresa de",
    "empresas de",
    "servicios de",
    "consultoria",
    "estrategia de",
    "generacion de leads",
];

static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(el|la|los|las|un|una|unos|unas|de|del|en|para|por|con)\b")
        .expect("valid article regex")
});

static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(cion|ciones|idad|idades|miento|mientos|mente|logia)\b").expect("valid suffix regex")
});

const PREPOSITION_SPACINGS: &[&str] = &[" de ", " del ", " para ", " por ", " con ", " en "];

/// Classifies a keyword as English or Spanish.
///
/// The network-backed tie-break is only reached when the character and
/// high-confidence phrase tiers are inconclusive AND the keyword is long
/// enough to be worth a call (more than one word or more than ten characters).
/// A failed or ambiguous tie-break falls through to the remaining rule tiers —
/// it never decides the outcome and never propagates an error.
pub async fn classify(keyword: &str, tie_break: &dyn LanguageTieBreak) -> Language {
    let lowered = keyword.to_lowercase();

    // Tier 1: Spanish-specific characters
    if lowered.chars().any(|c| SPANISH_CHARS.contains(c)) {
        return Language::Es;
    }

    // Tier 2: high-confidence phrases, plus "agencia" as a standalone word
    if HIGH_CONFIDENCE_PHRASES.iter().any(|p| lowered.contains(p))
        || lowered.split_whitespace().any(|w| w == "agencia")
    {
        return Language::Es;
    }

    let word_count = lowered.split_whitespace().count();

    // Tier 3: LLM tie-break, gated to non-trivial keywords
    if word_count > 1 || keyword.chars().count() > 10 {
        match tie_break.is_spanish(keyword).await {
            Some(true) => return Language::Es,
            Some(false) => return Language::En,
            None => {} // inconclusive — keep cascading
        }
    }

    // Tier 4: medium-confidence phrases
    if MEDIUM_CONFIDENCE_PHRASES
        .iter()
        .any(|p| lowered.contains(p))
    {
        return Language::Es;
    }

    // Tier 5: general heuristic, only meaningful on longer keywords
    if word_count > 2
        && ARTICLE_RE.is_match(&lowered)
        && (PREPOSITION_SPACINGS.iter().any(|s| lowered.contains(s)) || SUFFIX_RE.is_match(&lowered))
    {
        return Language::Es;
    }

    // Tier 6: default
    Language::En
}

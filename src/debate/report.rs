//! Tolerant extraction of the analyst's structured report.
//!
//! Model output is normalized first (whitespace and markdown code fences
//! removed) and then parsed as JSON. Whatever parses is returned as is; only
//! a parse failure yields the fixed fallback report.

use serde_json::{json, Value};

/// `conflict_core` of the fallback report
pub const FALLBACK_CONFLICT_CORE: &str = "parse failed";

/// `controversy_score` of the fallback report
pub const FALLBACK_CONTROVERSY_SCORE: u8 = 5;

const FENCE: &str = "```";

/// Report used when the analyst output is not valid JSON
pub fn fallback_report() -> Value {
    json!({
        "conflict_core": FALLBACK_CONFLICT_CORE,
        "controversy_score": FALLBACK_CONTROVERSY_SCORE,
    })
}

/// Outcome of a parse that cannot fail: either the parsed value or the
/// value substituted for it.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovered<T> {
    /// The input parsed
    Parsed(T),
    /// The input did not parse; this is the substitute
    Fallback(T),
}

impl<T> Recovered<T> {
    /// Whether the fallback was used
    pub fn is_fallback(&self) -> bool {
        matches!(self, Recovered::Fallback(_))
    }

    /// The value, parsed or not
    pub fn into_inner(self) -> T {
        match self {
            Recovered::Parsed(value) | Recovered::Fallback(value) => value,
        }
    }
}

/// Strip surrounding whitespace and a markdown code fence.
///
/// A leading fence may carry a language tag (`json`, `JSON`, ...).
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    }
    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

/// Parse analyst output, falling back when it is not valid JSON.
///
/// The parsed value is not checked against the expected report fields:
/// scores, extra keys and odd types from the model pass through unchanged.
pub fn extract_report(text: &str) -> Recovered<Value> {
    match serde_json::from_str::<Value>(strip_code_fence(text)) {
        Ok(report) => Recovered::Parsed(report),
        Err(_) => Recovered::Fallback(fallback_report()),
    }
}

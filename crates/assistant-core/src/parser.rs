//! Best-effort parsing of health-score completions.
//!
//! Models are instructed to answer with `Score:`, `Message:` and a
//! `Suggestions:` bullet list, but nothing guarantees they comply. The
//! parser here is total: any input produces a [`HealthReply`], falling
//! back to documented defaults when a section cannot be extracted.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Score used when no score can be extracted.
pub const DEFAULT_SCORE: i64 = 50;

/// Message used when no feedback message can be extracted.
pub const UNPARSEABLE_REPLY: &str = "AI response could not be parsed.";

/// A structured health reply extracted from a raw completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReply {
    /// Health score in [0, 100].
    pub score: i64,
    /// Human-readable feedback message.
    pub message: String,
    /// Suggestions in order of appearance; may be empty.
    pub suggestions: Vec<String>,
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)score\D*?(\d+)").unwrap())
}

fn message_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)message:\s*(.*?)\s*(?:suggestions:|$)").unwrap())
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(?:[-*]|\d+\.?)\s+(.+)$").unwrap())
}

/// Parse one raw completion into a [`HealthReply`].
///
/// Extraction rules:
/// - score: first integer following a `Score` marker, clamped to [0, 100];
///   defaults to [`DEFAULT_SCORE`]
/// - message: text after `Message:` up to the `Suggestions:` marker or end
///   of input, trimmed; defaults to [`UNPARSEABLE_REPLY`]
/// - suggestions: every bullet line (`-`, `*`, or `1.` style), in order;
///   bullet lines that only restate a `Score:` or `Message:` marker are
///   dropped
pub fn parse_health_reply(text: &str) -> HealthReply {
    let score = score_re()
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .map(|value| value.clamp(0, 100))
        .unwrap_or(DEFAULT_SCORE);

    let message = message_re()
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| UNPARSEABLE_REPLY.to_string());

    let suggestions = text
        .lines()
        .filter_map(|line| bullet_re().captures(line))
        .map(|caps| caps[1].trim().to_string())
        .filter(|item| !is_section_marker(item))
        .collect();

    HealthReply {
        score,
        message,
        suggestions,
    }
}

/// Bullet lines that restate a section header are false matches.
fn is_section_marker(item: &str) -> bool {
    let lower = item.to_lowercase();
    lower.starts_with("score:") || lower.starts_with("message:")
}

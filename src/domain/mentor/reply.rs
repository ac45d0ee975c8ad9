//! Splits raw model replies into body text and follow-up suggestions.

use serde::Serialize;

/// Marker the model is instructed to place before its follow-up questions.
pub const FOLLOW_UP_DELIMITER: &str = "---FOLLOW_UP---";

/// Separator between follow-up questions.
pub const SUGGESTION_SEPARATOR: char = '|';

pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReply {
    pub text: String,
    pub suggestions: Vec<String>,
}

/// Text before the first delimiter becomes the body; the segment after it is
/// split into at most three non-empty suggestions.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let mut parts = raw.split(FOLLOW_UP_DELIMITER);
    let text = parts.next().unwrap_or_default().trim().to_string();
    let suggestions = parts
        .next()
        .map(|tail| {
            tail.split(SUGGESTION_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(MAX_SUGGESTIONS)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    ParsedReply { text, suggestions }
}

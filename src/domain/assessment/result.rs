//! QuizResult - outcome of grading one open-ended answer.

use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 5;
pub const MAX_SCORE: u32 = 100;

/// Feedback shown when grading could not be performed.
pub const GRADING_FALLBACK_FEEDBACK: &str =
    "Evaluation failed. Please click 'Connect Key' in the sidebar or chat to provide a valid API key.";

/// AI-graded outcome. Held for the current session only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub level: u32,
    pub score: u32,
    pub feedback: String,
}

impl QuizResult {
    /// Builds a result with level forced into 1..=5 and score into 0..=100.
    pub fn clamped(level: i64, score: i64, feedback: impl Into<String>) -> Self {
        Self {
            level: level.clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL)) as u32,
            score: score.clamp(0, i64::from(MAX_SCORE)) as u32,
            feedback: feedback.into(),
        }
    }

    /// Minimum result used whenever grading fails.
    pub fn grading_fallback() -> Self {
        Self {
            level: MIN_LEVEL,
            score: 0,
            feedback: GRADING_FALLBACK_FEEDBACK.to_string(),
        }
    }
}

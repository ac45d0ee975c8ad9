//! Aggregate reporting over competency scores.
//!
//! Pure calculators in the same shape as the other analysis helpers: no state,
//! no I/O, just a function of the current scores.

use serde::{Deserialize, Serialize};

use super::{CompetencyId, CompetencyScores};

/// Overall readiness band derived from the mean score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallLevel {
    Novice,
    Competent,
    TopTier,
}

impl OverallLevel {
    const NOVICE_CEILING: f64 = 2.5;
    const COMPETENT_CEILING: f64 = 4.2;

    /// Band for a given mean.
    pub fn from_mean(mean: f64) -> Self {
        if mean < Self::NOVICE_CEILING {
            OverallLevel::Novice
        } else if mean < Self::COMPETENT_CEILING {
            OverallLevel::Competent
        } else {
            OverallLevel::TopTier
        }
    }

    /// Display label shown on the results screen.
    pub fn label(&self) -> &'static str {
        match self {
            OverallLevel::Novice => "Level 1: Novice / Explorer",
            OverallLevel::Competent => "Level 3: Competent AI PM",
            OverallLevel::TopTier => "Level 5: Top-Tier / Market Leader",
        }
    }
}

/// Lowest-scoring dimension, ties broken by [`CompetencyId::FOCUS_PRIORITY`].
pub fn recommended_focus(scores: &CompetencyScores) -> CompetencyId {
    let mut best = CompetencyId::FOCUS_PRIORITY[0];
    for id in CompetencyId::FOCUS_PRIORITY.iter().skip(1) {
        if scores.get(*id) < scores.get(best) {
            best = *id;
        }
    }
    best
}

/// Summary shown after the diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyReport {
    pub scores: CompetencyScores,
    pub mean: f64,
    pub overall: OverallLevel,
    pub overall_label: &'static str,
    pub focus: CompetencyId,
    pub focus_area: &'static str,
}

impl CompetencyReport {
    pub fn from_scores(scores: &CompetencyScores) -> Self {
        let mean = scores.mean();
        let overall = OverallLevel::from_mean(mean);
        let focus = recommended_focus(scores);
        Self {
            scores: *scores,
            mean,
            overall,
            overall_label: overall.label(),
            focus,
            focus_area: focus.focus_area(),
        }
    }
}

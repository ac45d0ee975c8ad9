//! Competency module - the five scored skill dimensions.

mod dimension;
mod report;
mod scores;

pub use dimension::CompetencyId;
pub use report::{recommended_focus, CompetencyReport, OverallLevel};
pub use scores::{CompetencyScores, DEFAULT_LEVEL};

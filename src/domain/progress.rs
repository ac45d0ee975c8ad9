//! Learner progress aggregate.
//!
//! Pure state transitions over scores, mastered skills and completed weeks.
//! Persistence and change notification live in the progress store service.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::catalog::ContentCatalog;
use crate::domain::competency::{CompetencyId, CompetencyScores};
use crate::domain::foundation::{ValidationError, WeekNumber};
use crate::domain::learner::LearnerProfile;

/// Everything the learner can change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LearnerProgress {
    pub scores: CompetencyScores,
    pub mastered_skills: BTreeSet<String>,
    pub completed_weeks: BTreeSet<WeekNumber>,
    pub profile: Option<LearnerProfile>,
}

impl LearnerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_score(&mut self, id: CompetencyId, level: u32) -> Result<(), ValidationError> {
        self.scores.set(id, level)
    }

    /// Adds or removes a leaf skill. Returns whether it is now mastered.
    pub fn toggle_mastered_skill(
        &mut self,
        catalog: &ContentCatalog,
        skill_id: &str,
    ) -> Result<bool, ValidationError> {
        if !catalog.is_leaf_skill(skill_id) {
            return Err(ValidationError::unknown_id("skill", skill_id));
        }
        if self.mastered_skills.remove(skill_id) {
            Ok(false)
        } else {
            self.mastered_skills.insert(skill_id.to_string());
            Ok(true)
        }
    }

    /// Set semantics. Returns true when the week was newly added.
    pub fn mark_week_complete(&mut self, week: WeekNumber) -> bool {
        self.completed_weeks.insert(week)
    }

    /// Restores default scores and clears skills and weeks. Keeps the profile.
    pub fn reset(&mut self) {
        self.scores = CompetencyScores::new();
        self.mastered_skills.clear();
        self.completed_weeks.clear();
    }
}

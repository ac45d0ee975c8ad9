//! Roadmap personalisation - highlights weeks by the learner's current scores.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::domain::catalog::{ContentCatalog, WeekPlan};
use crate::domain::competency::{CompetencyId, CompetencyScores};
use crate::domain::foundation::WeekNumber;

const WEAK_CEILING: u32 = 2;
const STRONG_FLOOR: u32 = 4;

/// How a week is highlighted on the roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    Neutral,
    /// At least one related dimension is weak.
    Priority,
    /// Every related dimension is already strong.
    Mastered,
    Completed,
}

/// Status from related competencies alone.
pub fn week_status(related: &[CompetencyId], scores: &CompetencyScores) -> WeekStatus {
    if related.is_empty() {
        return WeekStatus::Neutral;
    }
    if related.iter().any(|id| scores.get(*id) <= WEAK_CEILING) {
        return WeekStatus::Priority;
    }
    if related.iter().all(|id| scores.get(*id) >= STRONG_FLOOR) {
        return WeekStatus::Mastered;
    }
    WeekStatus::Neutral
}

/// A week as presented on the roadmap.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapEntry {
    #[serde(flatten)]
    pub plan: WeekPlan,
    pub status: WeekStatus,
    pub completed: bool,
    /// First week of a new phase; a phase header precedes it.
    pub phase_start: bool,
    pub has_quiz: bool,
}

/// Builds roadmap entries in catalog order.
///
/// Without `personalized`, incomplete weeks all show as neutral.
pub fn build_roadmap(
    catalog: &ContentCatalog,
    scores: &CompetencyScores,
    completed: &BTreeSet<WeekNumber>,
    personalized: bool,
) -> Vec<RoadmapEntry> {
    let mut previous_phase: Option<&str> = None;
    catalog
        .weeks
        .iter()
        .map(|plan| {
            let phase_start = previous_phase != Some(plan.phase.as_str());
            previous_phase = Some(plan.phase.as_str());
            let is_completed = completed.contains(&plan.week);
            let status = if is_completed {
                WeekStatus::Completed
            } else if personalized {
                week_status(&plan.related_competencies, scores)
            } else {
                WeekStatus::Neutral
            };
            RoadmapEntry {
                plan: plan.clone(),
                status,
                completed: is_completed,
                phase_start,
                has_quiz: catalog.weekly_quiz(plan.week).is_some(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(pairs: &[(CompetencyId, u32)]) -> CompetencyScores {
        let mut s = CompetencyScores::new();
        for (id, level) in pairs {
            s.set(*id, *level).unwrap();
        }
        s
    }

    #[test]
    fn no_related_competencies_is_neutral() {
        assert_eq!(week_status(&[], &scores(&[])), WeekStatus::Neutral);
    }

    #[test]
    fn any_weak_dimension_is_priority() {
        let s = scores(&[(CompetencyId::Tech, 5), (CompetencyId::Prob, 2)]);
        assert_eq!(
            week_status(&[CompetencyId::Tech, CompetencyId::Prob], &s),
            WeekStatus::Priority
        );
    }

    #[test]
    fn all_strong_is_mastered() {
        let s = scores(&[(CompetencyId::Tech, 4), (CompetencyId::Data, 5)]);
        assert_eq!(
            week_status(&[CompetencyId::Tech, CompetencyId::Data], &s),
            WeekStatus::Mastered
        );
    }

    #[test]
    fn middle_scores_are_neutral() {
        let s = scores(&[(CompetencyId::Econ, 3)]);
        assert_eq!(week_status(&[CompetencyId::Econ], &s), WeekStatus::Neutral);
    }

    #[test]
    fn roadmap_marks_phase_starts_and_completion() {
        let catalog = ContentCatalog::builtin().unwrap();
        let mut completed = BTreeSet::new();
        completed.insert(WeekNumber::new(1).unwrap());
        let entries = build_roadmap(&catalog, &CompetencyScores::new(), &completed, true);

        let starts: Vec<u8> = entries
            .iter()
            .filter(|e| e.phase_start)
            .map(|e| e.plan.week.value())
            .collect();
        assert_eq!(starts, vec![1, 5, 9]);
        assert_eq!(entries[0].status, WeekStatus::Completed);
        // default scores are all 1, so related weeks are priorities
        assert_eq!(entries[1].status, WeekStatus::Priority);
        // week 9 has no related competencies
        assert_eq!(entries[8].status, WeekStatus::Neutral);
        assert!(entries[4].has_quiz);
        assert!(!entries[3].has_quiz);
    }

    #[test]
    fn unpersonalized_roadmap_is_neutral() {
        let catalog = ContentCatalog::builtin().unwrap();
        let entries = build_roadmap(&catalog, &CompetencyScores::new(), &BTreeSet::new(), false);
        assert!(entries.iter().all(|e| e.status == WeekStatus::Neutral));
    }
}

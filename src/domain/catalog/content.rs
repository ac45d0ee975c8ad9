//! ContentCatalog - the immutable curriculum loaded once at startup.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::types::{
    Archetype, CompetencyDimension, DiagnosticQuestion, SkillNode, WeekPlan, WeeklyQuiz,
};
use crate::domain::competency::CompetencyId;
use crate::domain::foundation::{ValidationError, WeekNumber};

/// Errors raised while loading a catalog document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] ValidationError),
}

/// Every piece of static curriculum content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCatalog {
    pub weeks: Vec<WeekPlan>,
    pub competencies: Vec<CompetencyDimension>,
    pub diagnostic_questions: Vec<DiagnosticQuestion>,
    pub skills: Vec<SkillNode>,
    #[serde(default)]
    pub weekly_quizzes: Vec<WeeklyQuiz>,
    #[serde(default)]
    pub archetypes: Vec<Archetype>,
}

static BUILTIN: Lazy<Result<ContentCatalog, CatalogError>> =
    Lazy::new(|| ContentCatalog::from_yaml_str(include_str!("builtin_catalog.yaml")));

impl ContentCatalog {
    /// The curriculum compiled into the binary.
    pub fn builtin() -> Result<ContentCatalog, CatalogError> {
        BUILTIN.clone()
    }

    /// Parses and validates a YAML catalog document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: ContentCatalog =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks the structural invariants of the catalog.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_skills()?;
        self.validate_weeks()?;
        self.validate_quizzes()?;
        Ok(())
    }

    fn validate_skills(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for category in &self.skills {
            let children = category.children.as_ref().ok_or_else(|| {
                ValidationError::invalid_format(
                    "skills",
                    format!("top-level node '{}' must be a category with children", category.id),
                )
            })?;
            if !seen.insert(category.id.as_str()) {
                return Err(duplicate_skill(&category.id));
            }
            for child in children {
                if !child.is_leaf() {
                    return Err(ValidationError::invalid_format(
                        "skills",
                        format!("skill '{}' nests deeper than two levels", child.id),
                    ));
                }
                if !seen.insert(child.id.as_str()) {
                    return Err(duplicate_skill(&child.id));
                }
            }
        }
        Ok(())
    }

    fn validate_weeks(&self) -> Result<(), ValidationError> {
        let known: HashSet<CompetencyId> = self.competencies.iter().map(|c| c.id).collect();
        let mut weeks = HashSet::new();
        for plan in &self.weeks {
            if !weeks.insert(plan.week) {
                return Err(ValidationError::invalid_format(
                    "weeks",
                    format!("week {} is defined more than once", plan.week),
                ));
            }
            if let Some(id) = plan.related_competencies.iter().find(|id| !known.contains(id)) {
                return Err(ValidationError::unknown_id("competency", id.as_str()));
            }
        }
        if let Some(q) = self
            .diagnostic_questions
            .iter()
            .find(|q| !known.contains(&q.category))
        {
            return Err(ValidationError::unknown_id("competency", q.category.as_str()));
        }
        Ok(())
    }

    fn validate_quizzes(&self) -> Result<(), ValidationError> {
        let mut quiz_weeks = HashSet::new();
        for quiz in &self.weekly_quizzes {
            if self.week(quiz.week_id).is_none() {
                return Err(ValidationError::unknown_id("week", quiz.week_id.to_string()));
            }
            if !quiz_weeks.insert(quiz.week_id) {
                return Err(ValidationError::invalid_format(
                    "weekly_quizzes",
                    format!("week {} has more than one quiz", quiz.week_id),
                ));
            }
            if quiz.questions.is_empty() {
                return Err(ValidationError::invalid_format(
                    "weekly_quizzes",
                    format!("week {} quiz has no questions", quiz.week_id),
                ));
            }
            for question in &quiz.questions {
                if question.correct_index >= question.options.len() {
                    return Err(ValidationError::out_of_range(
                        format!("{}.correct_index", question.id),
                        0,
                        question.options.len() as i64 - 1,
                        question.correct_index as i64,
                    ));
                }
            }
        }
        Ok(())
    }

    /// Finds a category or leaf skill by id.
    pub fn find_skill(&self, id: &str) -> Option<&SkillNode> {
        self.skills.iter().find_map(|category| {
            if category.id == id {
                Some(category)
            } else {
                category.children().iter().find(|child| child.id == id)
            }
        })
    }

    /// Category that owns a leaf skill.
    pub fn parent_of(&self, id: &str) -> Option<&SkillNode> {
        self.skills
            .iter()
            .find(|category| category.children().iter().any(|child| child.id == id))
    }

    pub fn is_leaf_skill(&self, id: &str) -> bool {
        self.parent_of(id).is_some()
    }

    /// Ids of every leaf skill in catalog order.
    pub fn leaf_skill_ids(&self) -> Vec<&str> {
        self.skills
            .iter()
            .flat_map(|category| category.children())
            .map(|child| child.id.as_str())
            .collect()
    }

    pub fn week(&self, week: WeekNumber) -> Option<&WeekPlan> {
        self.weeks.iter().find(|plan| plan.week == week)
    }

    pub fn weekly_quiz(&self, week: WeekNumber) -> Option<&WeeklyQuiz> {
        self.weekly_quizzes.iter().find(|quiz| quiz.week_id == week)
    }

    pub fn competency(&self, id: CompetencyId) -> Option<&CompetencyDimension> {
        self.competencies.iter().find(|c| c.id == id)
    }

    pub fn diagnostic_question(&self, index: usize) -> Option<&DiagnosticQuestion> {
        self.diagnostic_questions.get(index)
    }

    /// Case-insensitive filter over leaf label and description.
    ///
    /// Categories with no matching children are dropped. A blank query
    /// returns the catalog unchanged.
    pub fn search_skills(&self, query: &str) -> Vec<SkillNode> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.skills.clone();
        }
        self.skills
            .iter()
            .filter_map(|category| {
                let matches: Vec<SkillNode> = category
                    .children()
                    .iter()
                    .filter(|child| {
                        child.label.to_lowercase().contains(&needle)
                            || child.description.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect();
                if matches.is_empty() {
                    None
                } else {
                    Some(SkillNode {
                        children: Some(matches),
                        ..category.clone()
                    })
                }
            })
            .collect()
    }
}

/// Percentage of a category's children that are mastered, rounded.
pub fn category_progress(category: &SkillNode, mastered: &HashSet<String>) -> u32 {
    let children = category.children();
    if children.is_empty() {
        return 0;
    }
    let done = children.iter().filter(|c| mastered.contains(&c.id)).count();
    ((done as f64 / children.len() as f64) * 100.0).round() as u32
}

fn duplicate_skill(id: &str) -> ValidationError {
    ValidationError::invalid_format("skills", format!("skill id '{}' is not unique", id))
}

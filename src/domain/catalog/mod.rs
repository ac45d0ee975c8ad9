//! Catalog module - static curriculum content.
//!
//! Weeks, competency definitions, the two-level skill tree, diagnostic
//! questions, mastery quizzes and role archetypes. Loaded once and shared
//! read-only for the lifetime of the process.

mod content;
mod types;

pub use content::{category_progress, CatalogError, ContentCatalog};
pub use types::{
    Archetype, CompetencyDimension, CompetencyLevels, DiagnosticQuestion, Importance, Resource,
    SkillCategory, SkillNode, WeekPlan, WeeklyQuiz, WeeklyQuizQuestion,
};

//! Read-only curriculum content types.

use serde::{Deserialize, Serialize};

use crate::domain::competency::CompetencyId;
use crate::domain::foundation::WeekNumber;

/// External learning resource attached to a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// One week of the twelve-week roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: WeekNumber,
    pub phase: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    pub output: String,
    #[serde(default)]
    pub related_competencies: Vec<CompetencyId>,
}

/// Descriptions anchoring the 1, 3 and 5 levels of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyLevels {
    pub novice: String,
    pub competent: String,
    pub expert: String,
}

/// A scored competency axis and what each anchor level looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyDimension {
    pub id: CompetencyId,
    pub name: String,
    pub levels: CompetencyLevels,
}

impl CompetencyDimension {
    /// Text describing a level. Levels 2 and 4 get a generic transition
    /// description; anything outside 1..=5 has none.
    pub fn describe_level(&self, level: u32) -> &str {
        match level {
            1 => &self.levels.novice,
            2 => "Foundational knowledge established. Progressing towards independent application.",
            3 => &self.levels.competent,
            4 => "Strong competence. Refining intuition and strategic depth towards mastery.",
            5 => &self.levels.expert,
            _ => "",
        }
    }
}

/// Open-response diagnostic question graded by the language model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticQuestion {
    pub id: String,
    /// Dimension whose score the graded level overwrites.
    pub category: CompetencyId,
    pub question: String,
    pub scenario: String,
    /// Grading instructions passed to the model.
    pub rubric: String,
}

/// Fixed-choice question in a week's mastery quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyQuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

/// Mastery quiz gating completion of a week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyQuiz {
    pub week_id: WeekNumber,
    pub questions: Vec<WeeklyQuizQuestion>,
}

/// Tag carried by every skill node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Tech,
    Product,
    Strategy,
    Data,
    Ethics,
    Prob,
    Econ,
    Tools,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Tech => "tech",
            SkillCategory::Product => "product",
            SkillCategory::Strategy => "strategy",
            SkillCategory::Data => "data",
            SkillCategory::Ethics => "ethics",
            SkillCategory::Prob => "prob",
            SkillCategory::Econ => "econ",
            SkillCategory::Tools => "tools",
        }
    }
}

/// How essential a skill is for the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Critical,
    Advanced,
    Niche,
}

/// Node in the two-level skill catalog.
///
/// Category nodes carry `children`; leaf skills carry the teaching fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub category: SkillCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SkillNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eli5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub practical_connection: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub talking_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_search_query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
}

impl SkillNode {
    /// Leaf skill with no teaching fields set.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            category,
            children: None,
            eli5: None,
            practical_connection: None,
            talking_points: Vec::new(),
            video_search_query: None,
            importance: None,
        }
    }

    /// Category node holding the given children.
    pub fn category(
        id: impl Into<String>,
        label: impl Into<String>,
        category: SkillCategory,
        children: Vec<SkillNode>,
    ) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(id, label, category)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Children of a category node; empty for leaves.
    pub fn children(&self) -> &[SkillNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Query used for the "watch a video" link.
    pub fn video_query(&self) -> String {
        match &self.video_search_query {
            Some(q) => q.clone(),
            None => format!("{} explained", self.label),
        }
    }
}

/// A flavour of AI product management role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    pub name: String,
    pub focus: String,
    pub content: String,
    pub skills: String,
}

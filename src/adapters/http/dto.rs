//! Request and response bodies for the HTTP API.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::application::DiagnosticView;
use crate::domain::assessment::QuizResult;
use crate::domain::catalog::SkillNode;
use crate::domain::competency::{CompetencyReport, CompetencyScores};
use crate::domain::constellation::{ConstellationLayout, Star};
use crate::domain::foundation::WeekNumber;
use crate::domain::learner::LearnerProfile;
use crate::domain::mentor::{ChatMessage, MentorHandoff, QuickPrompt};
use crate::ports::ModelInfo;

// ════════════════════════════════════════════════════════════════════════════════
// Meta
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: ModelInfo,
    pub credential_configured: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Catalog
// ════════════════════════════════════════════════════════════════════════════════

/// A top-level skill category with the share of its leaves mastered.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryProgressResponse {
    #[serde(flatten)]
    pub category: SkillNode,
    pub progress: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickPromptResponse {
    pub prompt: QuickPrompt,
    pub label: &'static str,
    pub question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillDetailResponse {
    pub skill: SkillNode,
    pub parent: Option<SkillNode>,
    pub mastered: bool,
    /// Link that reopens this detail view.
    pub deep_link: String,
    pub video_search_query: String,
    pub quick_prompts: Vec<QuickPromptResponse>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Progress and profile
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub scores: CompetencyScores,
    pub mastered_skills: BTreeSet<String>,
    pub completed_weeks: BTreeSet<WeekNumber>,
    pub report: CompetencyReport,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetScoreRequest {
    pub level: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToggleSkillResponse {
    pub skill_id: String,
    pub mastered: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<LearnerProfile>,
    pub setup_prompt_open: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Roadmap and assessment
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapQuery {
    #[serde(default = "default_personalized")]
    pub personalized: bool,
}

fn default_personalized() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOptionRequest {
    pub option: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentQuery {
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub view: DiagnosticView,
    /// Skill opened through the `?skill=` deep link, when it resolves.
    pub selected_skill: Option<SkillNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub result: QuizResult,
    pub view: DiagnosticView,
}

// ════════════════════════════════════════════════════════════════════════════════
// Constellation
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConstellationQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub stars: Option<usize>,
    /// Fixes the star field for reproducible output.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConstellationResponse {
    #[serde(flatten)]
    pub layout: ConstellationLayout,
    pub stars: Vec<Star>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Mentor and credential
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessage>,
    pub busy: bool,
    pub handoff: Option<MentorHandoff>,
}

/// A free-form question or one of the quick prompts. With neither, the
/// mentor is asked to explain the skill.
#[derive(Debug, Clone, Deserialize)]
pub struct HandoffRequest {
    pub skill_id: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub prompt: Option<QuickPrompt>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetCredentialRequest {
    pub api_key: String,
}

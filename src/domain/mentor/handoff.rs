//! Handoff from a skill detail view to the mentor.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::SkillNode;
use crate::domain::navigation::Route;

/// Canned questions offered next to a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickPrompt {
    Example,
    WhyNeeded,
    Risks,
    Roi,
}

impl QuickPrompt {
    pub const ALL: [QuickPrompt; 4] = [
        QuickPrompt::Example,
        QuickPrompt::WhyNeeded,
        QuickPrompt::Risks,
        QuickPrompt::Roi,
    ];

    pub fn button_label(&self) -> &'static str {
        match self {
            QuickPrompt::Example => "Give Example",
            QuickPrompt::WhyNeeded => "Why do I need this?",
            QuickPrompt::Risks => "Explain Risks",
            QuickPrompt::Roi => "ROI / Business Value",
        }
    }

    pub fn question(&self, label: &str) -> String {
        match self {
            QuickPrompt::Example => format!("Give me a real-world example of {}.", label),
            QuickPrompt::WhyNeeded => format!(
                "From a practical application perspective, why is {} important for me to \
                 understand? When would I need to consider this in a product lifecycle?",
                label
            ),
            QuickPrompt::Risks => {
                format!("What are the potential risks or downsides of {}?", label)
            }
            QuickPrompt::Roi => format!("How does {} relate to business value and ROI?", label),
        }
    }
}

/// Everything the mentor view needs to pick up a question about a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorHandoff {
    pub initial_query: String,
    /// Background on the skill, sent as conversational context.
    pub skill_context: String,
    /// Where "Return to" navigates.
    pub return_to: String,
    pub return_label: String,
}

impl MentorHandoff {
    /// Builds a handoff. A blank question falls back to a default
    /// "explain this concept" query.
    pub fn for_skill(skill: &SkillNode, question: Option<&str>) -> Self {
        let initial_query = match question.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => q.to_string(),
            None => format!(
                "Can you explain the concept of \"{}\" in more detail?",
                skill.label
            ),
        };
        Self {
            initial_query,
            skill_context: skill_context(skill),
            return_to: Route::skill_detail(skill.id.clone()).to_string(),
            return_label: skill.label.clone(),
        }
    }

    pub fn quick(skill: &SkillNode, prompt: QuickPrompt) -> Self {
        let question = prompt.question(&skill.label);
        Self::for_skill(skill, Some(&question))
    }
}

fn skill_context(skill: &SkillNode) -> String {
    let na = "N/A";
    let talking_points = if skill.talking_points.is_empty() {
        na.to_string()
    } else {
        skill.talking_points.join("; ")
    };
    format!(
        "The user is currently studying the skill/concept: \"{}\".\n\
         Category: {}.\n\
         Description: {}.\n\
         ELI5 Explanation: {}.\n\
         Expert Talking Points: {}.\n\
         Practical Relevance: {}.",
        skill.label,
        skill.category.as_str(),
        skill.description,
        skill.eli5.as_deref().unwrap_or(na),
        talking_points,
        skill.practical_connection.as_deref().unwrap_or(na),
    )
}

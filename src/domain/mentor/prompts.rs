//! Prompt text for the mentor and the grader.

use super::{ChatMessage, FOLLOW_UP_DELIMITER};
use crate::domain::learner::LearnerProfile;

/// Number of prior messages sent along as conversational context.
pub const CONTEXT_WINDOW: usize = 3;

/// Substituted when the model returns an empty reply.
pub const EMPTY_REPLY_TEXT: &str = "I'm having trouble thinking right now.";

const GENERIC_GREETING: &str = "Hello. I am your AI PM Coach. I'm here to help you navigate the \
transition from traditional product management to building with LLMs. Ask me about the roadmap, \
technical concepts (like RAG vs Fine-tuning), or to simulate an interview question.";

/// Opening message of a conversation.
pub fn greeting(profile: Option<&LearnerProfile>) -> String {
    match profile {
        Some(p) => format!(
            "Hello {}. I'm ready to help you leverage your {} years of experience as a {} to \
             break into AI. I'll use {} analogies where possible.",
            p.name, p.years_experience, p.role, p.industry
        ),
        None => GENERIC_GREETING.to_string(),
    }
}

/// Last few messages rendered as `role: text` lines.
pub fn build_context(history: &[ChatMessage]) -> String {
    let start = history.len().saturating_sub(CONTEXT_WINDOW);
    history[start..]
        .iter()
        .map(|m| format!("{}: {}", m.role, m.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persona and formatting rules, personalised when a profile exists.
pub fn mentor_system_instruction(profile: Option<&LearnerProfile>) -> String {
    let mut instruction = format!(
        "You are a world-class AI Product Management Mentor.\n\
         Focus on shifting mindset from \"Deterministic\" to \"Probabilistic\".\n\
         Keep responses concise, markdown-formatted.\n\
         Always end with \"{}\" followed by 3 pipe-separated questions.\n",
        FOLLOW_UP_DELIMITER
    );
    if let Some(p) = profile {
        instruction.push_str(&format!(
            "\nTHE LEARNER'S BACKGROUND:\n\
             - Role: {}\n\
             - Industry: {}\n\
             - Experience: {}\n\
             - Technical Comfort: {}\n\
             - Goal: {}\n\
             \nINSTRUCTIONS:\n\
             1. Use analogies from {}.\n\
             2. Adjust complexity based on Technical Comfort: {}.\n",
            p.role,
            p.industry,
            p.years_experience,
            p.technical_comfort,
            p.goal,
            p.industry,
            p.technical_comfort
        ));
    }
    instruction
}

/// User turn sent to the model.
pub fn mentor_user_content(context: &str, message: &str) -> String {
    format!("Context: {}\n\nUser: {}", context, message)
}

/// Grading prompt for one diagnostic answer.
pub fn grading_prompt(
    question: &str,
    scenario: &str,
    answer: &str,
    rubric: &str,
    profile: Option<&LearnerProfile>,
) -> String {
    let background = match profile {
        Some(p) => format!("{} in {}", p.role, p.industry),
        None => "unknown".to_string(),
    };
    format!(
        "Evaluate this AI PM candidate's response.\n\
         Question: {}\nScenario: {}\n\
         Answer: {}\n\
         Rubric: {}\n\n\
         User Profile: {}.\n",
        question, scenario, answer, rubric, background
    )
}

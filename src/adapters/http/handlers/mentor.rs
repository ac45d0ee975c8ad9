//! Mentor chat and handoffs from the skill detail view.

use axum::{extract::State, Json};

use crate::adapters::http::dto::{HandoffRequest, MessagesResponse, SendMessageRequest};
use crate::adapters::http::error::{ApiError, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::HandoffOutcome;
use crate::domain::foundation::ErrorCode;
use crate::domain::mentor::{ChatMessage, MentorHandoff};

pub async fn list_messages(State(state): State<AppState>) -> Json<MessagesResponse> {
    Json(MessagesResponse {
        messages: state.mentor.messages().await,
        busy: state.mentor.is_busy(),
        handoff: state.mentor.current_handoff().await,
    })
}

/// Sends a message. Provider failures come back as a mentor message with
/// remediation chips, not as an error status.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<ChatMessage>> {
    Ok(Json(state.mentor.send(&req.text).await?))
}

pub async fn accept_handoff(
    State(state): State<AppState>,
    Json(req): Json<HandoffRequest>,
) -> ApiResult<Json<HandoffOutcome>> {
    let skill = state
        .catalog()
        .find_skill(&req.skill_id)
        .ok_or_else(|| ApiError::not_found(ErrorCode::SkillNotFound, "Skill", &req.skill_id))?;

    let handoff = match req.prompt {
        Some(prompt) => MentorHandoff::quick(skill, prompt),
        None => MentorHandoff::for_skill(skill, req.question.as_deref()),
    };
    Ok(Json(state.mentor.accept_handoff(handoff).await?))
}

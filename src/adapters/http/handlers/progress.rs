//! Scores, mastered skills and the learner profile.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::adapters::http::dto::{ProfileResponse, ProgressResponse, SetScoreRequest, ToggleSkillResponse};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::state::AppState;
use crate::domain::competency::{CompetencyId, CompetencyReport};
use crate::domain::learner::LearnerProfile;

fn progress_response(state: &AppState) -> ProgressResponse {
    let snapshot = state.progress.snapshot();
    ProgressResponse {
        report: CompetencyReport::from_scores(&snapshot.scores),
        scores: snapshot.scores,
        mastered_skills: snapshot.mastered_skills,
        completed_weeks: snapshot.completed_weeks,
    }
}

pub async fn get_progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    Json(progress_response(&state))
}

pub async fn set_score(
    State(state): State<AppState>,
    Path(dimension): Path<String>,
    Json(req): Json<SetScoreRequest>,
) -> ApiResult<Json<ProgressResponse>> {
    let id: CompetencyId = dimension.parse()?;
    state.progress.set_score(id, req.level)?;
    Ok(Json(progress_response(&state)))
}

pub async fn reset_progress(State(state): State<AppState>) -> Json<ProgressResponse> {
    state.progress.reset_all();
    Json(progress_response(&state))
}

pub async fn toggle_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<String>,
) -> ApiResult<Json<ToggleSkillResponse>> {
    let mastered = state.progress.toggle_mastered_skill(&skill_id)?;
    Ok(Json(ToggleSkillResponse { skill_id, mastered }))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        profile: state.progress.profile(),
        setup_prompt_open: state.progress.setup_prompt_open(),
    })
}

pub async fn save_profile(
    State(state): State<AppState>,
    Json(profile): Json<LearnerProfile>,
) -> ApiResult<Json<ProfileResponse>> {
    state.progress.save_profile(profile).await?;
    Ok(get_profile(State(state)).await)
}

/// Opens the profile editor, as the header's profile button does.
pub async fn open_profile_editor(State(state): State<AppState>) -> Json<ProfileResponse> {
    state.progress.open_profile_editor();
    get_profile(State(state)).await
}

pub async fn close_profile_editor(State(state): State<AppState>) -> Json<ProfileResponse> {
    state.progress.close_profile_editor();
    get_profile(State(state)).await
}

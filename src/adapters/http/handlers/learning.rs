//! Roadmap, mastery quizzes and the diagnostic assessment.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::adapters::http::dto::{
    AnswerRequest, AnswerResponse, AssessmentQuery, AssessmentResponse, RoadmapQuery,
    SelectOptionRequest,
};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::state::AppState;
use crate::application::MasteryQuizView;
use crate::domain::assessment::QuizOutcome;
use crate::domain::foundation::WeekNumber;
use crate::domain::navigation::Route;
use crate::domain::roadmap::{build_roadmap, RoadmapEntry};

// ════════════════════════════════════════════════════════════════════════════════
// Roadmap
// ════════════════════════════════════════════════════════════════════════════════

pub async fn get_roadmap(
    State(state): State<AppState>,
    Query(query): Query<RoadmapQuery>,
) -> Json<Vec<RoadmapEntry>> {
    let snapshot = state.progress.snapshot();
    Json(build_roadmap(
        state.catalog(),
        &snapshot.scores,
        &snapshot.completed_weeks,
        query.personalized,
    ))
}

pub async fn get_quiz(State(state): State<AppState>) -> Json<MasteryQuizView> {
    Json(state.mastery.view().await)
}

pub async fn start_quiz(
    State(state): State<AppState>,
    Path(week): Path<u8>,
) -> ApiResult<Json<MasteryQuizView>> {
    let week = WeekNumber::new(week)?;
    Ok(Json(state.mastery.start(week).await?))
}

pub async fn select_option(
    State(state): State<AppState>,
    Path((week, question)): Path<(u8, usize)>,
    Json(req): Json<SelectOptionRequest>,
) -> ApiResult<Json<MasteryQuizView>> {
    let week = WeekNumber::new(week)?;
    Ok(Json(state.mastery.select(week, question, req.option).await?))
}

pub async fn submit_quiz(
    State(state): State<AppState>,
    Path(week): Path<u8>,
) -> ApiResult<Json<QuizOutcome>> {
    let week = WeekNumber::new(week)?;
    Ok(Json(state.mastery.submit(week).await?))
}

pub async fn close_quiz(State(state): State<AppState>) -> Json<MasteryQuizView> {
    Json(state.mastery.close().await)
}

// ════════════════════════════════════════════════════════════════════════════════
// Assessment
// ════════════════════════════════════════════════════════════════════════════════

/// Current assessment state. A `skill` parameter is the deep link into a
/// skill's detail and switches the assessment to skills mode.
pub async fn get_assessment(
    State(state): State<AppState>,
    Query(query): Query<AssessmentQuery>,
) -> Json<AssessmentResponse> {
    let (view, selected_skill) = match query.skill {
        Some(skill_id) => {
            let route = Route::skill_detail(skill_id);
            let view = if route.opens_skills() {
                state.diagnostic.open_skills().await
            } else {
                state.diagnostic.view().await
            };
            (view, route.selected_skill(state.catalog()).cloned())
        }
        None => (state.diagnostic.view().await, None),
    };
    Json(AssessmentResponse {
        view,
        selected_skill,
    })
}

pub async fn start_assessment(State(state): State<AppState>) -> ApiResult<Json<AssessmentResponse>> {
    let view = state.diagnostic.start().await?;
    Ok(Json(AssessmentResponse {
        view,
        selected_skill: None,
    }))
}

pub async fn answer_question(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> ApiResult<Json<AnswerResponse>> {
    let result = state.diagnostic.submit_answer(&req.answer).await?;
    Ok(Json(AnswerResponse {
        result,
        view: state.diagnostic.view().await,
    }))
}

pub async fn back_to_overview(State(state): State<AppState>) -> Json<AssessmentResponse> {
    Json(AssessmentResponse {
        view: state.diagnostic.back().await,
        selected_skill: None,
    })
}

//! Read-only curriculum endpoints.

use std::collections::HashSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use rand::{rngs::StdRng, SeedableRng};

use crate::adapters::http::dto::{
    CategoryProgressResponse, ConstellationQuery, ConstellationResponse, QuickPromptResponse,
    SearchQuery, SkillDetailResponse,
};
use crate::adapters::http::error::{ApiError, ApiResult};
use crate::adapters::http::state::AppState;
use crate::domain::catalog::{category_progress, Archetype, CompetencyDimension, SkillNode, WeekPlan};
use crate::domain::constellation::{
    decorative_stars, layout, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_STAR_COUNT,
};
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::mentor::QuickPrompt;
use crate::domain::navigation::Route;

const MAX_STAR_COUNT: usize = 2000;

pub async fn list_weeks(State(state): State<AppState>) -> Json<Vec<WeekPlan>> {
    Json(state.catalog().weeks.clone())
}

pub async fn list_competencies(State(state): State<AppState>) -> Json<Vec<CompetencyDimension>> {
    Json(state.catalog().competencies.clone())
}

pub async fn list_archetypes(State(state): State<AppState>) -> Json<Vec<Archetype>> {
    Json(state.catalog().archetypes.clone())
}

/// Skill categories, each with the percentage of its skills mastered.
pub async fn list_skills(State(state): State<AppState>) -> Json<Vec<CategoryProgressResponse>> {
    let mastered: HashSet<String> = state.progress.mastered_skills().into_iter().collect();
    let categories = state
        .catalog()
        .skills
        .iter()
        .map(|category| CategoryProgressResponse {
            progress: category_progress(category, &mastered),
            category: category.clone(),
        })
        .collect();
    Json(categories)
}

pub async fn search_skills(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<SkillNode>> {
    Json(state.catalog().search_skills(&query.q))
}

pub async fn get_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<String>,
) -> ApiResult<Json<SkillDetailResponse>> {
    let catalog = state.catalog();
    let skill = catalog
        .find_skill(&skill_id)
        .ok_or_else(|| ApiError::not_found(ErrorCode::SkillNotFound, "Skill", &skill_id))?;

    let quick_prompts = QuickPrompt::ALL
        .iter()
        .map(|prompt| QuickPromptResponse {
            prompt: *prompt,
            label: prompt.button_label(),
            question: prompt.question(&skill.label),
        })
        .collect();

    Ok(Json(SkillDetailResponse {
        parent: catalog.parent_of(&skill.id).cloned(),
        mastered: state.progress.mastered_skills().contains(&skill.id),
        deep_link: Route::skill_detail(skill.id.clone()).to_string(),
        video_search_query: skill.video_query(),
        quick_prompts,
        skill: skill.clone(),
    }))
}

/// Radial skill map for a canvas of the requested size, with a
/// decorative star field. `seed` makes the stars reproducible.
pub async fn get_constellation(
    State(state): State<AppState>,
    Query(query): Query<ConstellationQuery>,
) -> ApiResult<Json<ConstellationResponse>> {
    let width = canvas_dimension("width", query.width, DEFAULT_CANVAS_WIDTH)?;
    let height = canvas_dimension("height", query.height, DEFAULT_CANVAS_HEIGHT)?;
    let count = query.stars.unwrap_or(DEFAULT_STAR_COUNT).min(MAX_STAR_COUNT);

    let mut rng = match query.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    Ok(Json(ConstellationResponse {
        layout: layout(&state.catalog().skills, width, height),
        stars: decorative_stars(count, width, height, &mut rng),
    }))
}

fn canvas_dimension(field: &str, value: Option<f64>, default: f64) -> Result<f64, ValidationError> {
    match value {
        None => Ok(default),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(_) => Err(ValidationError::invalid_format(field, "must be a positive number")),
    }
}

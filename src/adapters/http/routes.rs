//! Route table for the JSON API.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{catalog, learning, mentor, progress, system};
use super::state::AppState;
use crate::config::ServerConfig;

/// Builds the full API router with tracing, CORS and request timeouts.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(system::health))
        // Catalog
        .route("/catalog/weeks", get(catalog::list_weeks))
        .route("/catalog/competencies", get(catalog::list_competencies))
        .route("/catalog/archetypes", get(catalog::list_archetypes))
        .route("/catalog/skills", get(catalog::list_skills))
        .route("/catalog/skills/search", get(catalog::search_skills))
        .route("/catalog/skills/:id", get(catalog::get_skill))
        .route("/constellation", get(catalog::get_constellation))
        // Progress
        .route("/progress", get(progress::get_progress))
        .route("/progress/scores/:dimension", put(progress::set_score))
        .route("/progress/reset", post(progress::reset_progress))
        .route("/progress/skills/:id/toggle", post(progress::toggle_skill))
        .route("/profile", get(progress::get_profile).put(progress::save_profile))
        .route(
            "/profile/editor",
            post(progress::open_profile_editor).delete(progress::close_profile_editor),
        )
        // Roadmap
        .route("/roadmap", get(learning::get_roadmap))
        .route("/roadmap/quiz", get(learning::get_quiz))
        .route(
            "/roadmap/weeks/:week/quiz",
            post(learning::start_quiz).delete(learning::close_quiz),
        )
        .route(
            "/roadmap/weeks/:week/quiz/answers/:question",
            put(learning::select_option),
        )
        .route("/roadmap/weeks/:week/quiz/submit", post(learning::submit_quiz))
        // Assessment
        .route("/assessment", get(learning::get_assessment))
        .route("/assessment/start", post(learning::start_assessment))
        .route("/assessment/answer", post(learning::answer_question))
        .route("/assessment/back", post(learning::back_to_overview))
        // Mentor
        .route(
            "/mentor/messages",
            get(mentor::list_messages).post(mentor::send_message),
        )
        .route("/mentor/handoff", post(mentor::accept_handoff))
        // Credential
        .route(
            "/credential",
            get(system::get_credential)
                .put(system::set_credential)
                .delete(system::clear_credential),
        )
}

/// Origins that fail to parse are skipped with a warning; none at all
/// leaves cross-origin requests disallowed.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

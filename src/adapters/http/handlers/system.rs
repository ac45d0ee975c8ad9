//! Service health and the API credential.

use axum::{extract::State, Json};

use crate::adapters::http::dto::{HealthResponse, SetCredentialRequest};
use crate::adapters::http::error::ApiResult;
use crate::adapters::http::state::AppState;
use crate::application::CredentialStatus;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: state.model_info.clone(),
        credential_configured: state.credentials.status().configured,
    })
}

pub async fn get_credential(State(state): State<AppState>) -> Json<CredentialStatus> {
    Json(state.credentials.status())
}

/// Stores a pasted key. The response carries only its fingerprint.
pub async fn set_credential(
    State(state): State<AppState>,
    Json(req): Json<SetCredentialRequest>,
) -> ApiResult<Json<CredentialStatus>> {
    Ok(Json(state.credentials.set_credential(&req.api_key).await?))
}

pub async fn clear_credential(State(state): State<AppState>) -> ApiResult<Json<CredentialStatus>> {
    Ok(Json(state.credentials.clear_credential().await?))
}

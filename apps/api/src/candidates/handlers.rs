use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::extract::{positive_id, AppJson, AppPath};
use crate::models::candidate::{Candidate, NewCandidate};
use crate::state::AppState;

/// POST /candidate/
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewCandidate>,
) -> Result<(StatusCode, Json<Candidate>), AppError> {
    let candidate = state.store.create_candidate(req).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /candidate/
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<Candidate>>, AppError> {
    Ok(Json(state.store.list_candidates().await?))
}

/// GET /candidate/:candidate_id/
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    AppPath(candidate_id): AppPath<i64>,
) -> Result<Json<Candidate>, AppError> {
    let candidate_id = positive_id(candidate_id, "candidateId")?;
    let candidate = state
        .store
        .get_candidate(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;
    Ok(Json(candidate))
}

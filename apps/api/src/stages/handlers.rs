use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::extract::{positive_id, AppJson, AppPath};
use crate::models::stage::{Stage, StagePatch, StageStatus};
use crate::state::AppState;

async fn apply_patch(
    state: &AppState,
    (candidate_id, stage_id): (i64, i64),
    patch: &StagePatch,
) -> Result<Stage, AppError> {
    let candidate_id = positive_id(candidate_id, "candidateId")?;
    let stage_id = positive_id(stage_id, "stageId")?;

    state
        .store
        .update_stage(candidate_id, stage_id, patch)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Stage {stage_id} not found for candidate {candidate_id}"
            ))
        })
}

/// POST /candidate/:candidate_id/stages/:stage_id/
pub async fn handle_edit_stage(
    State(state): State<AppState>,
    AppPath(ids): AppPath<(i64, i64)>,
    AppJson(patch): AppJson<StagePatch>,
) -> Result<Json<Stage>, AppError> {
    let stage = apply_patch(&state, ids, &patch).await?;
    Ok(Json(stage))
}

/// POST /candidate/:candidate_id/stages/:stage_id/pass/
pub async fn handle_pass_stage(
    State(state): State<AppState>,
    AppPath(ids): AppPath<(i64, i64)>,
) -> Result<Json<Stage>, AppError> {
    transition(&state, ids, StageStatus::Pass).await
}

/// POST /candidate/:candidate_id/stages/:stage_id/fail/
pub async fn handle_fail_stage(
    State(state): State<AppState>,
    AppPath(ids): AppPath<(i64, i64)>,
) -> Result<Json<Stage>, AppError> {
    transition(&state, ids, StageStatus::Fail).await
}

// Unconditional: any prior status may be overwritten.
async fn transition(
    state: &AppState,
    ids: (i64, i64),
    status: StageStatus,
) -> Result<Json<Stage>, AppError> {
    let stage = apply_patch(state, ids, &StagePatch::with_status(status)).await?;
    info!(
        "Stage {} of candidate {} marked {status}",
        stage.id, stage.candidate_id
    );
    Ok(Json(stage))
}

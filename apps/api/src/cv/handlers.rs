use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::errors::AppError;
use crate::extract::{positive_id, AppPath};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /candidate/:candidate_id/cv/
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    AppPath(candidate_id): AppPath<i64>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, AppError> {
    let candidate_id = positive_id(candidate_id, "candidateId")?;
    let mut multipart = multipart?;

    if !state.store.candidate_exists(candidate_id).await? {
        return Err(AppError::NotFound(format!(
            "Candidate {candidate_id} not found"
        )));
    }

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let data = field.bytes().await?;
        state.cvs.save(candidate_id, data).await?;
        return Ok(StatusCode::NO_CONTENT);
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

/// GET /candidate/:candidate_id/cv/
pub async fn handle_download_cv(
    State(state): State<AppState>,
    AppPath(candidate_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let candidate_id = positive_id(candidate_id, "candidateId")?;
    let data = state
        .cvs
        .load(candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No CV for candidate {candidate_id}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{candidate_id}-cv.pdf\""),
            ),
        ],
        data,
    ))
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::cv::handlers as cv;
use crate::stages::handlers as stages;
use crate::state::AppState;

/// Every API path ends in a slash; the unslashed forms are not routed.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/candidate/",
            get(candidates::handle_list_candidates).post(candidates::handle_create_candidate),
        )
        .route(
            "/candidate/:candidate_id/",
            get(candidates::handle_get_candidate),
        )
        .route(
            "/candidate/:candidate_id/cv/",
            get(cv::handle_download_cv).post(cv::handle_upload_cv),
        )
        .route(
            "/candidate/:candidate_id/stages/:stage_id/",
            post(stages::handle_edit_stage),
        )
        .route(
            "/candidate/:candidate_id/stages/:stage_id/pass/",
            post(stages::handle_pass_stage),
        )
        .route(
            "/candidate/:candidate_id/stages/:stage_id/fail/",
            post(stages::handle_fail_stage),
        )
        .with_state(state)
}

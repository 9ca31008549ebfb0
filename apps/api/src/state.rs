use std::sync::Arc;

use crate::cv::storage::CvStorage;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Candidate/stage persistence. `PgStore` in production.
    pub store: Arc<dyn CandidateStore>,
    pub cvs: CvStorage,
}

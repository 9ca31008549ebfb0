//! Persistence seam between handlers and PostgreSQL.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::models::candidate::{Candidate, NewCandidate};
use crate::models::stage::{Stage, StagePatch};

pub use postgres::PgStore;

/// Candidate and stage persistence.
///
/// Lookups return `Ok(None)` for rows that do not exist (or are soft-deleted);
/// `Err` is reserved for backend failures.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Inserts the candidate together with any inline stages.
    async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, sqlx::Error>;

    /// All visible candidates in id order, each with its stages.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, sqlx::Error>;

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, sqlx::Error>;

    async fn candidate_exists(&self, id: i64) -> Result<bool, sqlx::Error>;

    /// Applies `patch` to the stage `stage_id` owned by `candidate_id`.
    async fn update_stage(
        &self,
        candidate_id: i64,
        stage_id: i64,
        patch: &StagePatch,
    ) -> Result<Option<Stage>, sqlx::Error>;
}

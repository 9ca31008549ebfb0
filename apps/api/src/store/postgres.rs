use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::candidate::{attach_stages, Candidate, NewCandidate};
use crate::models::stage::{Stage, StagePatch};
use crate::store::CandidateStore;

// Ids are cast so tables created with INTEGER keys decode the same as BIGSERIAL ones.
const CANDIDATE_COLUMNS: &str =
    "id::BIGINT AS id, firstname, lastname, position, email, phone, created_at, updated_at";

const STAGE_COLUMNS: &str = "id::BIGINT AS id, status, notes, lead, datetime, \"type\", \
     candidate_id::BIGINT AS candidate_id, created_at, updated_at";

/// `CandidateStore` backed by the shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn stages_for(&self, candidate_ids: &[i64]) -> Result<Vec<Stage>, sqlx::Error> {
        sqlx::query_as::<_, Stage>(&format!(
            "SELECT {STAGE_COLUMNS} FROM stages \
             WHERE candidate_id = ANY($1) AND deleted_at IS NULL \
             ORDER BY id"
        ))
        .bind(candidate_ids)
        .fetch_all(&self.pool)
        .await
    }
}

#[async_trait]
impl CandidateStore for PgStore {
    async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut candidate = sqlx::query_as::<_, Candidate>(&format!(
            "INSERT INTO candidates \
                 (firstname, lastname, position, email, phone, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) \
             RETURNING {CANDIDATE_COLUMNS}"
        ))
        .bind(&new.firstname)
        .bind(&new.lastname)
        .bind(&new.position)
        .bind(&new.email)
        .bind(&new.phone)
        .fetch_one(&mut *tx)
        .await?;

        for stage in &new.stages {
            let row = sqlx::query_as::<_, Stage>(&format!(
                "INSERT INTO stages \
                     (status, notes, lead, datetime, \"type\", candidate_id, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW()) \
                 RETURNING {STAGE_COLUMNS}"
            ))
            .bind(stage.status.unwrap_or_default().as_str())
            .bind(&stage.notes)
            .bind(&stage.lead)
            .bind(&stage.datetime)
            .bind(&stage.stage_type)
            .bind(candidate.id)
            .fetch_one(&mut *tx)
            .await?;
            candidate.stages.push(row);
        }

        tx.commit().await?;

        info!(
            "Created candidate {} with {} stage(s)",
            candidate.id,
            candidate.stages.len()
        );
        Ok(candidate)
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, sqlx::Error> {
        let mut candidates = sqlx::query_as::<_, Candidate>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = candidates.iter().map(|c| c.id).collect();
        let stages = self.stages_for(&ids).await?;
        attach_stages(&mut candidates, stages);

        Ok(candidates)
    }

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, sqlx::Error> {
        let candidate: Option<Candidate> = sqlx::query_as(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut candidate) = candidate else {
            return Ok(None);
        };

        candidate.stages = self.stages_for(&[id]).await?;
        Ok(Some(candidate))
    }

    async fn candidate_exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM candidates WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_stage(
        &self,
        candidate_id: i64,
        stage_id: i64,
        patch: &StagePatch,
    ) -> Result<Option<Stage>, sqlx::Error> {
        // NULL binds keep the stored column via COALESCE.
        sqlx::query_as::<_, Stage>(&format!(
            r#"
            UPDATE stages SET
                status     = COALESCE($3, status),
                notes      = COALESCE($4, notes),
                lead       = COALESCE($5, lead),
                datetime   = COALESCE($6, datetime),
                "type"     = COALESCE($7, "type"),
                updated_at = NOW()
            WHERE id = $1 AND candidate_id = $2 AND deleted_at IS NULL
            RETURNING {STAGE_COLUMNS}
            "#
        ))
        .bind(stage_id)
        .bind(candidate_id)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.notes.as_deref())
        .bind(patch.lead.as_deref())
        .bind(patch.datetime.as_deref())
        .bind(patch.stage_type.as_deref())
        .fetch_optional(&self.pool)
        .await
    }
}

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::candidate::{attach_stages, Candidate, NewCandidate};
use crate::models::stage::{Stage, StagePatch};
use crate::store::CandidateStore;

#[derive(Default)]
struct Tables {
    candidates: BTreeMap<i64, Candidate>,
    stages: BTreeMap<i64, Stage>,
    next_candidate_id: i64,
    next_stage_id: i64,
}

/// In-process store used by router tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn stages_of(tables: &Tables, candidate_id: i64) -> Vec<Stage> {
        tables
            .stages
            .values()
            .filter(|s| s.candidate_id == candidate_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn create_candidate(&self, new: NewCandidate) -> Result<Candidate, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();

        tables.next_candidate_id += 1;
        let id = tables.next_candidate_id;
        let candidate = Candidate {
            id,
            firstname: new.firstname,
            lastname: new.lastname,
            position: new.position,
            email: new.email,
            phone: new.phone,
            created_at: now,
            updated_at: now,
            stages: Vec::new(),
        };
        tables.candidates.insert(id, candidate.clone());

        for stage in new.stages {
            tables.next_stage_id += 1;
            let stage_id = tables.next_stage_id;
            tables.stages.insert(
                stage_id,
                Stage {
                    id: stage_id,
                    status: stage.status.unwrap_or_default(),
                    notes: stage.notes,
                    lead: stage.lead,
                    datetime: stage.datetime,
                    stage_type: stage.stage_type,
                    candidate_id: id,
                    created_at: now,
                    updated_at: now,
                },
            );
        }

        Ok(Candidate {
            stages: Self::stages_of(&tables, id),
            ..candidate
        })
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let mut candidates: Vec<Candidate> = tables.candidates.values().cloned().collect();
        attach_stages(&mut candidates, tables.stages.values().cloned().collect());
        Ok(candidates)
    }

    async fn get_candidate(&self, id: i64) -> Result<Option<Candidate>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.candidates.get(&id).cloned().map(|c| Candidate {
            stages: Self::stages_of(&tables, id),
            ..c
        }))
    }

    async fn candidate_exists(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.tables.lock().unwrap().candidates.contains_key(&id))
    }

    async fn update_stage(
        &self,
        candidate_id: i64,
        stage_id: i64,
        patch: &StagePatch,
    ) -> Result<Option<Stage>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let Some(stage) = tables
            .stages
            .get_mut(&stage_id)
            .filter(|s| s.candidate_id == candidate_id)
        else {
            return Ok(None);
        };

        apply_patch(patch, stage);
        stage.updated_at = Utc::now();
        Ok(Some(stage.clone()))
    }
}

/// Mirrors the `COALESCE` update in `PgStore`: only present fields overwrite.
fn apply_patch(patch: &StagePatch, stage: &mut Stage) {
    if let Some(status) = patch.status {
        stage.status = status;
    }
    if let Some(notes) = &patch.notes {
        stage.notes = notes.clone();
    }
    if let Some(lead) = &patch.lead {
        stage.lead = lead.clone();
    }
    if let Some(datetime) = &patch.datetime {
        stage.datetime = datetime.clone();
    }
    if let Some(stage_type) = &patch.stage_type {
        stage.stage_type = stage_type.clone();
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::null_as_default;
use crate::models::stage::{NewStage, Stage};

/// Serialized with snake_case keys (`id`, `created_at`), not the `ID`/`CreatedAt`
/// keys of the earlier service.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Candidate {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub stages: Vec<Stage>,
}

/// Body of `POST /candidate/`. Missing or `null` fields default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewCandidate {
    #[serde(deserialize_with = "null_as_default")]
    pub firstname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lastname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stages: Vec<NewStage>,
}

/// Distributes stages onto their owning candidates, keeping each list ordered by stage id.
pub fn attach_stages(candidates: &mut [Candidate], stages: Vec<Stage>) {
    let mut by_owner: HashMap<i64, Vec<Stage>> = HashMap::new();
    for stage in stages {
        by_owner.entry(stage.candidate_id).or_default().push(stage);
    }

    for candidate in candidates.iter_mut() {
        let mut owned = by_owner.remove(&candidate.id).unwrap_or_default();
        owned.sort_by_key(|s| s.id);
        candidate.stages = owned;
    }
}

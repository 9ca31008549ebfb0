use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::models::null_as_default;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    #[default]
    Pending,
    Pass,
    Fail,
}

impl StageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::Pass => "pass",
            StageStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown stage status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for StageStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(StageStatus::Pending),
            "pass" => Ok(StageStatus::Pass),
            "fail" => Ok(StageStatus::Fail),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for StageStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One interview step owned by a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Stage {
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub status: StageStatus,
    pub notes: String,
    pub lead: String,
    /// Free text; never parsed.
    pub datetime: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub stage_type: String,
    pub candidate_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stage supplied inline when a candidate is created.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewStage {
    #[serde(deserialize_with = "blank_status")]
    pub status: Option<StageStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lead: String,
    #[serde(deserialize_with = "null_as_default")]
    pub datetime: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub stage_type: String,
}

/// Partial stage update. `None` leaves the stored value alone; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StagePatch {
    /// An empty string counts as absent.
    #[serde(deserialize_with = "blank_status")]
    pub status: Option<StageStatus>,
    pub notes: Option<String>,
    pub lead: Option<String>,
    pub datetime: Option<String>,
    #[serde(rename = "type")]
    pub stage_type: Option<String>,
}

/// `null`, missing or `""` mean "no status given"; anything else must be a known status.
fn blank_status<'de, D>(deserializer: D) -> Result<Option<StageStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

impl StagePatch {
    pub fn with_status(status: StageStatus) -> Self {
        StagePatch {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stage() -> Stage {
        let now = Utc::now();
        Stage {
            id: 1,
            status: StageStatus::Pending,
            notes: "phone screen went well".to_string(),
            lead: "Dana".to_string(),
            datetime: "2024-03-01T10:00".to_string(),
            stage_type: "technical".to_string(),
            candidate_id: 9,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("pass".parse::<StageStatus>().unwrap(), StageStatus::Pass);
        assert_eq!(
            StageStatus::try_from("fail".to_string()).unwrap(),
            StageStatus::Fail
        );
        assert!("PASS".parse::<StageStatus>().is_err());
        assert_eq!(StageStatus::default(), StageStatus::Pending);
    }

    #[test]
    fn test_patch_tracks_presence() {
        let patch: StagePatch = serde_json::from_str(r#"{"notes":"ok"}"#).unwrap();
        assert_eq!(patch.notes.as_deref(), Some("ok"));
        assert_eq!(patch.lead, None);
        assert_eq!(patch.datetime, None);
        assert_eq!(patch.stage_type, None);
        assert_eq!(patch.status, None);
    }

    #[test]
    fn test_patch_empty_string_is_present() {
        let patch: StagePatch = serde_json::from_str(r#"{"lead":"","type":"onsite"}"#).unwrap();
        assert_eq!(patch.lead.as_deref(), Some(""));
        assert_eq!(patch.stage_type.as_deref(), Some("onsite"));
    }

    #[test]
    fn test_patch_null_is_absent() {
        let patch: StagePatch = serde_json::from_str(r#"{"notes":null,"id":44}"#).unwrap();
        assert_eq!(patch, StagePatch::default());
    }

    #[test]
    fn test_patch_rejects_unknown_status() {
        let result: Result<StagePatch, _> = serde_json::from_str(r#"{"status":"maybe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_status_is_absent() {
        let patch: StagePatch = serde_json::from_str(r#"{"status":""}"#).unwrap();
        assert_eq!(patch.status, None);

        let stage: NewStage =
            serde_json::from_str(r#"{"status":"","notes":null,"type":"onsite"}"#).unwrap();
        assert_eq!(stage.status.unwrap_or_default(), StageStatus::Pending);
        assert_eq!(stage.notes, "");
        assert_eq!(stage.stage_type, "onsite");
    }

    #[test]
    fn test_stage_serializes_type_field() {
        let value = serde_json::to_value(sample_stage()).unwrap();
        assert_eq!(value["type"], "technical");
        assert_eq!(value["status"], "pending");
        assert!(value.get("stage_type").is_none());
        assert_eq!(value["candidate_id"], 9);
        assert!(value.get("CandidateID").is_none());
    }
}

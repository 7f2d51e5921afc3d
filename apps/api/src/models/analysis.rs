use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of one resume analysis run.
///
/// `processing` on creation or retry, `completed` once every configured kind
/// finishes, `failed` when an analyzer propagates an upstream error. A
/// degraded run (some fields defaulted after malformed LLM output) still
/// reports `completed` — there is no partially-degraded status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum AnalysisStatus {
    Processing,
    Completed,
    Failed,
}

/// Persisted record tracking one resume's analysis lifecycle.
/// Exclusively owned by `user_id`; every read path checks ownership.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_id: Uuid,
    pub status: AnalysisStatus,
    pub profile_results: Option<Value>,
    pub technical_results: Option<Value>,
    pub aha_results: Option<Value>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AnalysisRecord {
    /// Fresh record in `processing`, before any analyzer has run.
    pub fn new_processing(user_id: Uuid, resume_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            resume_id,
            status: AnalysisStatus::Processing,
            profile_results: None,
            technical_results: None,
            aha_results: None,
            error: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AnalysisStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(
            serde_json::to_string(&AnalysisStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn test_new_processing_record_is_empty() {
        let record = AnalysisRecord::new_processing(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(record.status, AnalysisStatus::Processing);
        assert!(record.profile_results.is_none());
        assert!(record.error.is_none());
        assert!(record.completed_at.is_none());
    }
}

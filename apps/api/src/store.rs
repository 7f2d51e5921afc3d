//! Persistence seam for resumes and analysis records.
//!
//! The orchestrator consumes storage as a plain get/put/query interface; the
//! Postgres implementation lives here and tests swap in an in-memory fake.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRecord, AnalysisStatus};

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Extracted text of a stored resume owned by `user_id`, if present.
    async fn resume_text(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<String>, AppError>;

    /// Most recently updated record for a (user, resume) pair.
    async fn latest_for_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<AnalysisRecord>, AppError>;

    async fn insert(&self, record: &AnalysisRecord) -> Result<(), AppError>;

    /// Retry: back to `processing`, prior results and error cleared.
    async fn reset_for_retry(&self, id: Uuid) -> Result<(), AppError>;

    async fn mark_completed(
        &self,
        id: Uuid,
        profile: &Value,
        technical: &Value,
        aha: &Value,
    ) -> Result<(), AppError>;

    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<AnalysisRecord>, AppError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnalysisRecord>, AppError>;
}

const RECORD_COLUMNS: &str = "id, user_id, resume_id, status, profile_results, \
    technical_results, aha_results, error, created_at, updated_at, completed_at";

pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn resume_text(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<String>, AppError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT extracted_text FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(resume_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|r| r.0))
    }

    async fn latest_for_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<AnalysisRecord>, AppError> {
        let record = sqlx::query_as::<_, AnalysisRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM analyses \
             WHERE resume_id = $1 AND user_id = $2 \
             ORDER BY updated_at DESC LIMIT 1"
        ))
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn insert(&self, record: &AnalysisRecord) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO analyses \
             (id, user_id, resume_id, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.resume_id)
        .bind(record.status)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn reset_for_retry(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE analyses SET status = $2, error = NULL, completed_at = NULL, \
             profile_results = NULL, technical_results = NULL, aha_results = NULL, \
             updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(AnalysisStatus::Processing)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_completed(
        &self,
        id: Uuid,
        profile: &Value,
        technical: &Value,
        aha: &Value,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query(
            "UPDATE analyses SET status = $2, profile_results = $3, \
             technical_results = $4, aha_results = $5, error = NULL, \
             completed_at = $6, updated_at = $6 WHERE id = $1",
        )
        .bind(id)
        .bind(AnalysisStatus::Completed)
        .bind(profile)
        .bind(technical)
        .bind(aha)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), AppError> {
        let now = Utc::now();
        sqlx::query(
            "UPDATE analyses SET status = $2, error = $3, completed_at = $4, \
             updated_at = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(AnalysisStatus::Failed)
        .bind(error)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<AnalysisRecord>, AppError> {
        let record = sqlx::query_as::<_, AnalysisRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM analyses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnalysisRecord>, AppError> {
        let records = sqlx::query_as::<_, AnalysisRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM analyses \
             WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

/// In-memory store for orchestrator tests. One run owns its record for the
/// whole duration by contract, so a coarse mutex is enough.
#[cfg(test)]
pub struct MemoryStore {
    resumes: std::sync::Mutex<std::collections::HashMap<(Uuid, Uuid), String>>,
    records: std::sync::Mutex<Vec<AnalysisRecord>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            resumes: std::sync::Mutex::new(std::collections::HashMap::new()),
            records: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_resume(self, user_id: Uuid, resume_id: Uuid, text: &str) -> Self {
        self.resumes
            .lock()
            .unwrap()
            .insert((user_id, resume_id), text.to_string());
        self
    }
}

#[cfg(test)]
#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn resume_text(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<String>, AppError> {
        Ok(self.resumes.lock().unwrap().get(&(user_id, resume_id)).cloned())
    }

    async fn latest_for_resume(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> Result<Option<AnalysisRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id && r.resume_id == resume_id)
            .max_by_key(|r| r.updated_at)
            .cloned())
    }

    async fn insert(&self, record: &AnalysisRecord) -> Result<(), AppError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn reset_for_retry(&self, id: Uuid) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.id == id) {
            r.status = AnalysisStatus::Processing;
            r.profile_results = None;
            r.technical_results = None;
            r.aha_results = None;
            r.error = None;
            r.completed_at = None;
            r.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn mark_completed(
        &self,
        id: Uuid,
        profile: &Value,
        technical: &Value,
        aha: &Value,
    ) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.id == id) {
            let now = Utc::now();
            r.status = AnalysisStatus::Completed;
            r.profile_results = Some(profile.clone());
            r.technical_results = Some(technical.clone());
            r.aha_results = Some(aha.clone());
            r.error = None;
            r.completed_at = Some(now);
            r.updated_at = now;
        }
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> Result<(), AppError> {
        let mut records = self.records.lock().unwrap();
        if let Some(r) = records.iter_mut().find(|r| r.id == id) {
            let now = Utc::now();
            r.status = AnalysisStatus::Failed;
            r.error = Some(error.to_string());
            r.completed_at = Some(now);
            r.updated_at = now;
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<AnalysisRecord>, AppError> {
        Ok(self.records.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AnalysisRecord>, AppError> {
        let mut records: Vec<AnalysisRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        Ok(records)
    }
}

//! Orchestrates a full resume analysis run: profile, then technical skills,
//! then hidden equivalents, sequentially with a pause between kinds.
//!
//! One record per (user, resume) pair. A second request for the same pair
//! returns the existing record untouched unless the caller asks for a retry,
//! which resets the record and runs again under the same id.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::analysis::{aha, profile, technical, AnalysisRequest};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::analysis::AnalysisRecord;
use crate::pacer::Pacer;
use crate::store::AnalysisStore;

#[derive(Clone)]
pub struct AnalysisService {
    store: Arc<dyn AnalysisStore>,
    llm: Arc<dyn TextGenerator>,
    pacer: Arc<dyn Pacer>,
}

impl AnalysisService {
    pub fn new(
        store: Arc<dyn AnalysisStore>,
        llm: Arc<dyn TextGenerator>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self { store, llm, pacer }
    }

    /// Runs (or reuses) the analysis for one resume and returns its record.
    ///
    /// An upstream LLM failure does not surface as an error here: the record
    /// is marked `failed` with the message and returned, so the caller can
    /// inspect the outcome and offer a retry.
    pub async fn run(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
        retry: bool,
        today: NaiveDate,
    ) -> Result<AnalysisRecord, AppError> {
        let resume_text = self
            .store
            .resume_text(user_id, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound("resume not found".to_string()))?;
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "resume has no extracted text to analyze".to_string(),
            ));
        }

        let id = match self.store.latest_for_resume(user_id, resume_id).await? {
            Some(existing) if !retry => {
                info!(analysis_id = %existing.id, "Reusing existing analysis");
                return Ok(existing);
            }
            Some(existing) => {
                info!(analysis_id = %existing.id, "Retrying analysis");
                self.store.reset_for_retry(existing.id).await?;
                existing.id
            }
            None => {
                let record = AnalysisRecord::new_processing(user_id, resume_id);
                self.store.insert(&record).await?;
                info!(analysis_id = %record.id, "Starting analysis");
                record.id
            }
        };

        let request = AnalysisRequest { resume_text, today };

        match self.run_kinds(&request).await {
            Ok((profile, technical, aha)) => {
                self.store.mark_completed(id, &profile, &technical, &aha).await?;
                info!(analysis_id = %id, "Analysis completed");
            }
            Err(AppError::Llm(message)) => {
                error!(analysis_id = %id, "Analysis failed: {message}");
                self.store.mark_failed(id, &message).await?;
            }
            Err(other) => return Err(other),
        }

        self.store.get(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("analysis record {id} disappeared mid-run"))
        })
    }

    async fn run_kinds(
        &self,
        request: &AnalysisRequest,
    ) -> Result<(Value, Value, Value), AppError> {
        let profile = profile::analyzer().analyze(self.llm.as_ref(), request).await?;
        self.pacer.pause().await;
        let technical = technical::analyzer().analyze(self.llm.as_ref(), request).await?;
        self.pacer.pause().await;
        let aha = aha::analyzer().analyze(self.llm.as_ref(), request).await?;

        Ok((
            serde_json::to_value(&profile).map_err(anyhow::Error::from)?,
            serde_json::to_value(&technical).map_err(anyhow::Error::from)?,
            serde_json::to_value(&aha).map_err(anyhow::Error::from)?,
        ))
    }
}

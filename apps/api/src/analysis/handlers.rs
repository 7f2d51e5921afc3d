use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::aha::{self, HiddenEquivalentsAnalysis};
use crate::analysis::chat::{self, ChatReply, ChatRequest};
use crate::analysis::profile::{self, ProfileAnalysis};
use crate::analysis::pronunciation::{self, PronunciationAnalysis, PronunciationRequest};
use crate::analysis::roadmap::{self, RoadmapRequest, RoadmapResult};
use crate::analysis::technical::{self, TechnicalSkillsAnalysis};
use crate::analysis::voice::{self, VoiceAnalysis, VoiceRequest};
use crate::analysis::AnalysisRequest;
use crate::errors::AppError;
use crate::models::analysis::AnalysisRecord;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct CreateAnalysisRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
    /// Rerun even if a record already exists for this resume.
    #[serde(default)]
    pub retry: bool,
}

#[derive(Deserialize)]
pub struct SingleKindRequest {
    pub user_id: Uuid,
    pub resume_id: Uuid,
}

/// POST /api/v1/analyses
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(req): Json<CreateAnalysisRequest>,
) -> Result<Json<AnalysisRecord>, AppError> {
    let record = state
        .service
        .run(req.user_id, req.resume_id, req.retry, Utc::now().date_naive())
        .await?;
    Ok(Json(record))
}

/// GET /api/v1/analyses
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<AnalysisRecord>>, AppError> {
    let records = state.store.list_by_user(params.user_id).await?;
    Ok(Json(records))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<AnalysisRecord>, AppError> {
    let record = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    if record.user_id != params.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(Json(record))
}

/// POST /api/v1/analyses/profile
pub async fn handle_profile(
    State(state): State<AppState>,
    Json(req): Json<SingleKindRequest>,
) -> Result<Json<ProfileAnalysis>, AppError> {
    let request = resume_request(&state, &req).await?;
    let result = profile::analyzer()
        .analyze(state.llm.as_ref(), &request)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/analyses/technical
pub async fn handle_technical(
    State(state): State<AppState>,
    Json(req): Json<SingleKindRequest>,
) -> Result<Json<TechnicalSkillsAnalysis>, AppError> {
    let request = resume_request(&state, &req).await?;
    let result = technical::analyzer()
        .analyze(state.llm.as_ref(), &request)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/analyses/aha
pub async fn handle_aha(
    State(state): State<AppState>,
    Json(req): Json<SingleKindRequest>,
) -> Result<Json<HiddenEquivalentsAnalysis>, AppError> {
    let request = resume_request(&state, &req).await?;
    let result = aha::analyzer()
        .analyze(state.llm.as_ref(), &request)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Json(req): Json<RoadmapRequest>,
) -> Result<Json<RoadmapResult>, AppError> {
    if req.user_input.target_role.trim().is_empty() {
        return Err(AppError::Validation("target_role is required".to_string()));
    }
    let result = roadmap::analyzer()
        .analyze(state.llm.as_ref(), &req)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/coach/voice
pub async fn handle_voice(
    State(state): State<AppState>,
    Json(req): Json<VoiceRequest>,
) -> Result<Json<VoiceAnalysis>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }
    let result = voice::analyzer()
        .analyze(state.llm.as_ref(), &req)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/coach/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("No message provided".to_string()));
    }
    // A missing or still-processing analysis is not an error here; the chat
    // simply runs without resume context.
    let analysis = match req.analysis_id {
        Some(id) => {
            let record = state.store.get(id).await?;
            if let Some(record) = &record {
                if record.user_id != req.user_id {
                    return Err(AppError::Forbidden);
                }
            }
            record
        }
        None => None,
    };
    let reply = chat::respond(state.llm.as_ref(), &req, analysis.as_ref()).await?;
    Ok(Json(reply))
}

/// POST /api/v1/coach/pronunciation
pub async fn handle_pronunciation(
    State(state): State<AppState>,
    Json(req): Json<PronunciationRequest>,
) -> Result<Json<PronunciationAnalysis>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }
    let result = pronunciation::analyzer()
        .analyze(state.llm.as_ref(), &req)
        .await?;
    Ok(Json(result))
}

/// Loads the resume text for a one-shot analyzer call, enforcing ownership
/// and the non-empty precondition before any upstream call is made.
async fn resume_request(
    state: &AppState,
    req: &SingleKindRequest,
) -> Result<AnalysisRequest, AppError> {
    let resume_text = state
        .store
        .resume_text(req.user_id, req.resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("resume not found".to_string()))?;
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume has no extracted text to analyze".to_string(),
        ));
    }
    Ok(AnalysisRequest {
        resume_text,
        today: Utc::now().date_naive(),
    })
}

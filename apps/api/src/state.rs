use std::sync::Arc;

use crate::analysis::service::AnalysisService;
use crate::llm_client::LlmClient;
use crate::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnalysisStore>,
    pub llm: Arc<LlmClient>,
    pub service: AnalysisService,
}

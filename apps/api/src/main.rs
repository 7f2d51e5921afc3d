mod analysis;
mod config;
mod db;
mod errors;
mod extract;
mod llm_client;
mod models;
mod pacer;
mod routes;
mod sanitize;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::service::AnalysisService;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::pacer::FixedDelayPacer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgAnalysisStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("northbound_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Northbound API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(config.anthropic_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let store: Arc<dyn store::AnalysisStore> = Arc::new(PgAnalysisStore::new(db));
    let pacer = Arc::new(FixedDelayPacer::new(Duration::from_millis(
        config.inter_kind_delay_ms,
    )));
    let service = AnalysisService::new(store.clone(), llm.clone(), pacer);

    let state = AppState {
        store,
        llm,
        service,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

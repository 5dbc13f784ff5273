mod analysis;
mod config;
mod dashboard;
mod errors;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{schema::response_schema, GeminiAnalyzer};
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::AnalysisSession;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS dashboard v{}", env!("CARGO_PKG_VERSION"));

    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_api_base,
        &config.gemini_model,
    )?;
    if llm.has_api_key() {
        info!("LLM client initialized (model: {})", llm.model());
    } else {
        warn!("GEMINI_API_KEY is not set; every analysis attempt will fail until it is configured");
    }

    let analyzer = Arc::new(GeminiAnalyzer::new(llm, config.analysis_temperature));
    let session = AnalysisSession::new(analyzer);

    let state = AppState {
        session,
        config: config.clone(),
        schema: Arc::new(response_schema()),
    };

    // The dashboard UI is served separately and calls this API from the browser.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::session::AnalysisSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<AnalysisSession>,
    pub config: Config,
    /// Response schema sent to the model, served read-only for inspection.
    pub schema: Arc<Value>,
}

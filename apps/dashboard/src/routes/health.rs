use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version, configured model, and whether a key is present.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-dashboard",
        "model": state.config.gemini_model,
        "api_key_configured": state.config.gemini_api_key.is_some()
    }))
}

pub mod analysis;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analysis",
            get(analysis::handle_get_status).post(analysis::handle_upload),
        )
        .route(
            "/api/v1/analysis/dashboard",
            get(analysis::handle_get_dashboard),
        )
        .route("/api/v1/analysis/export", get(analysis::handle_export))
        .route("/api/v1/analysis/schema", get(analysis::handle_get_schema))
        .route("/api/v1/analysis/cancel", post(analysis::handle_cancel))
        .route("/api/v1/analysis/retry", post(analysis::handle_retry))
        .route("/api/v1/analysis/reset", post(analysis::handle_reset))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

//! Axum route handlers for the analysis dashboard.

use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dashboard::export::content_disposition;
use crate::dashboard::feedback::CategoryFilter;
use crate::dashboard::DashboardView;
use crate::errors::AppError;
use crate::session::state::AttemptId;
use crate::session::{SessionError, SessionSnapshot};
use crate::state::AppState;
use crate::upload::{validate_upload, UploadError};

/// Multipart field carrying the résumé.
pub const UPLOAD_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub attempt_id: AttemptId,
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub category: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Validates the uploaded PDF locally and starts one analysis attempt.
/// Refused with 409 while another attempt is analyzing.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    if state.session.is_analyzing().await {
        return Err(SessionError::AttemptInFlight.into());
    }

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        let document = validate_upload(
            &file_name,
            content_type.as_deref(),
            bytes,
            state.config.max_upload_bytes,
        )?;
        let attempt_id = state.session.start(document).await?;

        return Ok((
            StatusCode::ACCEPTED,
            Json(UploadResponse {
                attempt_id,
                status: "analyzing",
            }),
        ));
    }

    Err(UploadError::MissingFile(UPLOAD_FIELD).into())
}

/// GET /api/v1/analysis
pub async fn handle_get_status(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot().await)
}

/// GET /api/v1/analysis/dashboard?category=Keywords
///
/// Derived dashboard for the current result. 404 unless the session is in `success`.
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let tab = query
        .category
        .as_deref()
        .unwrap_or_default()
        .parse::<CategoryFilter>()
        .map_err(AppError::Validation)?;

    state
        .session
        .with_result(|result| DashboardView::build(result, tab))
        .await
        .map(Json)
        .ok_or_else(no_result)
}

/// GET /api/v1/analysis/export
///
/// Downloads the full dashboard as a JSON attachment named after the candidate.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let view = state
        .session
        .with_result(|result| DashboardView::build(result, CategoryFilter::All))
        .await
        .ok_or_else(no_result)?;

    let body = serde_json::to_vec_pretty(&view).map_err(anyhow::Error::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&view.export_file_name)),
        ],
        body,
    ))
}

/// POST /api/v1/analysis/cancel
pub async fn handle_cancel(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.session.cancel().await?))
}

/// POST /api/v1/analysis/retry
pub async fn handle_retry(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.session.retry().await?))
}

/// POST /api/v1/analysis/reset
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.session.reset().await?))
}

/// GET /api/v1/analysis/schema
pub async fn handle_get_schema(State(state): State<AppState>) -> Json<Value> {
    Json(state.schema.as_ref().clone())
}

fn no_result() -> AppError {
    AppError::NotFound("No completed analysis is available".to_string())
}

//! Application state machine owner.
//!
//! Exactly one `AnalysisSession` exists per process. It serialises every
//! transition through `state::transition`, runs each attempt on a Tokio task,
//! and aborts that task on cancel/reset. The attempt-id guard in the reducer
//! still drops any completion that races past the abort.

pub mod state;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::analysis::{AnalysisError, ResumeAnalyzer};
use crate::models::analysis::AnalysisResult;
use crate::upload::{extract_preview, DocumentInfo, UploadedDocument};

use self::state::{transition, AnalysisStatus, AttemptId, Failure, SessionEvent};

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("An analysis is already in progress")]
    AttemptInFlight,

    #[error("Cannot {action} while the session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Point-in-time view of the session for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub status: &'static str,
    pub attempt_id: Option<AttemptId>,
    pub document: Option<DocumentInfo>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error: Option<Failure>,
    pub result: Option<AnalysisResult>,
}

struct SessionInner {
    status: AnalysisStatus,
    document: Option<DocumentInfo>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    in_flight: Option<JoinHandle<()>>,
}

impl SessionInner {
    fn apply(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        let action = event.name();
        let from = self.status.name();
        match transition(&self.status, event) {
            Some(next) => {
                info!("Session transition: {} -> {}", from, next.name());
                self.status = next;
                Ok(())
            }
            None => Err(SessionError::InvalidTransition {
                action,
                state: from,
            }),
        }
    }

    fn clear(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
            debug!("Aborted in-flight analysis task");
        }
        self.document = None;
        self.started_at = None;
        self.finished_at = None;
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status.name(),
            attempt_id: self.status.attempt(),
            document: self.document.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            error: self.status.failure().cloned(),
            result: self.status.result().cloned(),
        }
    }
}

pub struct AnalysisSession {
    analyzer: Arc<dyn ResumeAnalyzer>,
    inner: Mutex<SessionInner>,
}

impl AnalysisSession {
    pub fn new(analyzer: Arc<dyn ResumeAnalyzer>) -> Arc<Self> {
        Arc::new(Self {
            analyzer,
            inner: Mutex::new(SessionInner {
                status: AnalysisStatus::Idle,
                document: None,
                started_at: None,
                finished_at: None,
                in_flight: None,
            }),
        })
    }

    /// Begins one attempt for a validated document. Only valid from `idle`.
    pub async fn start(self: &Arc<Self>, document: UploadedDocument) -> Result<AttemptId, SessionError> {
        let mut inner = self.inner.lock().await;

        if matches!(inner.status, AnalysisStatus::Analyzing { .. }) {
            warn!("Rejected file selection: attempt already in flight");
            return Err(SessionError::AttemptInFlight);
        }

        let attempt = AttemptId::new();
        inner.apply(SessionEvent::FileSelected { attempt })?;

        info!(
            "Attempt {attempt} started for '{}' ({} bytes)",
            document.file_name,
            document.size_bytes()
        );
        inner.document = Some(DocumentInfo {
            file_name: document.file_name.clone(),
            size_bytes: document.size_bytes(),
            preview_text: None,
        });
        inner.started_at = Some(Utc::now());
        inner.finished_at = None;

        // The lock is held until the handle is stored, so `complete` cannot
        // observe this attempt before `in_flight` is set.
        let session = Arc::clone(self);
        let bytes = document.bytes;
        let preview_bytes = bytes.clone();
        inner.in_flight = Some(tokio::spawn(async move {
            let outcome = session.analyzer.analyze(bytes).await;
            session.complete(attempt, outcome).await;
        }));

        // Extraction runs beside the model call and never delays its outcome.
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let preview = extract_preview(preview_bytes).await;
            session.attach_preview(attempt, preview).await;
        });

        Ok(attempt)
    }

    /// Applies an attempt's outcome if that attempt is still current.
    pub(crate) async fn complete(
        &self,
        attempt: AttemptId,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) {
        let mut inner = self.inner.lock().await;

        let event = match outcome {
            Ok(result) => SessionEvent::Resolved { attempt, result },
            Err(err) => SessionEvent::Rejected {
                attempt,
                failure: Failure::from(&err),
            },
        };

        match inner.apply(event) {
            Ok(()) => {
                inner.in_flight = None;
                inner.finished_at = Some(Utc::now());
            }
            Err(_) => debug!("Discarding stale outcome for attempt {attempt}"),
        }
    }

    /// Stores preview text for the document if `attempt` is still current.
    pub(crate) async fn attach_preview(&self, attempt: AttemptId, preview: Option<String>) {
        let Some(text) = preview else {
            return;
        };
        let mut inner = self.inner.lock().await;
        if inner.status.attempt() != Some(attempt) {
            debug!("Discarding stale preview for attempt {attempt}");
            return;
        }
        if let Some(doc) = inner.document.as_mut() {
            doc.preview_text = Some(text);
        }
    }

    /// Leaves `analyzing` for `idle` and aborts the in-flight request.
    pub async fn cancel(&self) -> Result<SessionSnapshot, SessionError> {
        let mut inner = self.inner.lock().await;
        inner.apply(SessionEvent::Cancelled)?;
        inner.clear();
        Ok(inner.snapshot())
    }

    /// Leaves `error` for `idle` so a new file can be chosen.
    pub async fn retry(&self) -> Result<SessionSnapshot, SessionError> {
        let mut inner = self.inner.lock().await;
        inner.apply(SessionEvent::Retried)?;
        inner.clear();
        Ok(inner.snapshot())
    }

    /// Leaves `success` for `idle`, discarding the held result.
    pub async fn reset(&self) -> Result<SessionSnapshot, SessionError> {
        let mut inner = self.inner.lock().await;
        inner.apply(SessionEvent::Reset)?;
        inner.clear();
        Ok(inner.snapshot())
    }

    pub async fn is_analyzing(&self) -> bool {
        matches!(
            self.inner.lock().await.status,
            AnalysisStatus::Analyzing { .. }
        )
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// Runs `f` against the current result without cloning it.
    pub async fn with_result<T>(&self, f: impl FnOnce(&AnalysisResult) -> T) -> Option<T> {
        let inner = self.inner.lock().await;
        inner.status.result().map(f)
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;
    use std::time::Duration;

    async fn wait_for_status(session: &AnalysisSession, status: &str) -> SessionSnapshot {
        for _ in 0..200 {
            let snap = session.snapshot().await;
            if snap.status == status {
                return snap;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("session never reached {status}");
    }

    #[tokio::test]
    async fn test_start_moves_to_analyzing_then_success() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());

        let attempt = session.start(document()).await.unwrap();
        let snap = session.snapshot().await;
        assert_eq!(snap.status, "analyzing");
        assert_eq!(snap.attempt_id, Some(attempt));
        assert_eq!(snap.document.unwrap().file_name, "jane.pdf");

        analyzer.release.notify_one();
        let snap = wait_for_status(&session, "success").await;
        assert_eq!(snap.result.unwrap().ats_score, 72);
        assert!(snap.finished_at.is_some());
        assert_eq!(analyzer.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_moves_to_error_with_message() {
        let analyzer = GatedAnalyzer::failing(|| AnalysisError::EmptyResponse);
        let session = AnalysisSession::new(analyzer.clone());

        session.start(document()).await.unwrap();
        analyzer.release.notify_one();

        let snap = wait_for_status(&session, "error").await;
        let error = snap.error.unwrap();
        assert_eq!(error.kind, "empty_response");
        assert!(error.retryable);
        assert!(snap.result.is_none());
    }

    #[tokio::test]
    async fn test_second_start_while_analyzing_is_refused() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());

        session.start(document()).await.unwrap();
        let err = session.start(document()).await.unwrap_err();
        assert_eq!(err, SessionError::AttemptInFlight);
    }

    #[tokio::test]
    async fn test_start_from_success_requires_reset() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());
        session.start(document()).await.unwrap();
        analyzer.release.notify_one();
        wait_for_status(&session, "success").await;

        let err = session.start(document()).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { state: "success", .. }));

        let snap = session.reset().await.unwrap();
        assert_eq!(snap.status, "idle");
        assert!(snap.result.is_none());
        assert!(snap.document.is_none());
    }

    #[tokio::test]
    async fn test_cancel_aborts_and_stays_idle() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());

        session.start(document()).await.unwrap();
        let snap = session.cancel().await.unwrap();
        assert_eq!(snap.status, "idle");

        analyzer.release.notify_one();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(session.snapshot().await.status, "idle");
    }

    #[tokio::test]
    async fn test_late_completion_after_cancel_is_discarded() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());

        let attempt = session.start(document()).await.unwrap();
        session.cancel().await.unwrap();

        session.complete(attempt, Ok(sample_result())).await;
        let snap = session.snapshot().await;
        assert_eq!(snap.status, "idle");
        assert!(snap.result.is_none());
    }

    #[tokio::test]
    async fn test_stale_completion_does_not_touch_new_attempt() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());

        let first = session.start(document()).await.unwrap();
        session.cancel().await.unwrap();
        let second = session.start(document()).await.unwrap();

        session
            .complete(first, Err(AnalysisError::EmptyResponse))
            .await;
        let snap = session.snapshot().await;
        assert_eq!(snap.status, "analyzing");
        assert_eq!(snap.attempt_id, Some(second));
    }

    #[tokio::test]
    async fn test_outcome_applies_without_waiting_for_preview() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());

        let attempt = session.start(document()).await.unwrap();
        session.complete(attempt, Ok(sample_result())).await;
        let snap = session.snapshot().await;
        assert_eq!(snap.status, "success");

        session
            .attach_preview(attempt, Some("Jane Doe".to_string()))
            .await;
        let snap = session.snapshot().await;
        assert_eq!(
            snap.document.unwrap().preview_text.as_deref(),
            Some("Jane Doe")
        );
    }

    #[tokio::test]
    async fn test_preview_for_replaced_attempt_is_discarded() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());

        let first = session.start(document()).await.unwrap();
        session.cancel().await.unwrap();
        session.start(document()).await.unwrap();

        session
            .attach_preview(first, Some("stale".to_string()))
            .await;
        let snap = session.snapshot().await;
        assert_eq!(snap.document.unwrap().preview_text, None);
    }

    #[tokio::test]
    async fn test_retry_returns_to_idle() {
        let analyzer = GatedAnalyzer::failing(|| AnalysisError::Configuration);
        let session = AnalysisSession::new(analyzer.clone());
        session.start(document()).await.unwrap();
        analyzer.release.notify_one();
        let snap = wait_for_status(&session, "error").await;
        assert!(!snap.error.unwrap().retryable);

        assert_eq!(session.retry().await.unwrap().status, "idle");
        assert!(session.retry().await.is_err());
    }

    #[tokio::test]
    async fn test_cancel_from_idle_is_invalid() {
        let session = AnalysisSession::new(GatedAnalyzer::succeeding());
        let err = session.cancel().await.unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidTransition {
                action: "cancel",
                state: "idle"
            }
        );
    }

    #[tokio::test]
    async fn test_with_result_only_in_success() {
        let analyzer = GatedAnalyzer::succeeding();
        let session = AnalysisSession::new(analyzer.clone());
        assert!(session.with_result(|r| r.ats_score).await.is_none());

        session.start(document()).await.unwrap();
        analyzer.release.notify_one();
        wait_for_status(&session, "success").await;
        assert_eq!(session.with_result(|r| r.ats_score).await, Some(72));
    }
}

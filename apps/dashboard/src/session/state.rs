//! Lifecycle of one analysis attempt as a pure reducer.
//!
//! `transition` never performs I/O: the session controller feeds it events and
//! applies whatever state it returns. `None` means the event does not apply in
//! the current state and must be ignored.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::analysis::AnalysisError;
use crate::models::analysis::AnalysisResult;

/// Identifies one attempt. A completion carrying a different id than the
/// current `Analyzing` state is stale and gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        AttemptId(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// User-facing description of a failed attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub kind: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl From<&AnalysisError> for Failure {
    fn from(err: &AnalysisError) -> Self {
        Failure {
            kind: err.kind(),
            message: err.user_message(),
            retryable: err.is_retryable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisStatus {
    Idle,
    Analyzing {
        attempt: AttemptId,
    },
    Success {
        attempt: AttemptId,
        result: Box<AnalysisResult>,
    },
    Error {
        attempt: AttemptId,
        failure: Failure,
    },
}

impl AnalysisStatus {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisStatus::Idle => "idle",
            AnalysisStatus::Analyzing { .. } => "analyzing",
            AnalysisStatus::Success { .. } => "success",
            AnalysisStatus::Error { .. } => "error",
        }
    }

    pub fn attempt(&self) -> Option<AttemptId> {
        match self {
            AnalysisStatus::Idle => None,
            AnalysisStatus::Analyzing { attempt }
            | AnalysisStatus::Success { attempt, .. }
            | AnalysisStatus::Error { attempt, .. } => Some(*attempt),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            AnalysisStatus::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            AnalysisStatus::Error { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum SessionEvent {
    FileSelected { attempt: AttemptId },
    Resolved { attempt: AttemptId, result: AnalysisResult },
    Rejected { attempt: AttemptId, failure: Failure },
    Cancelled,
    Retried,
    Reset,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::FileSelected { .. } => "select a file",
            SessionEvent::Resolved { .. } => "resolve",
            SessionEvent::Rejected { .. } => "reject",
            SessionEvent::Cancelled => "cancel",
            SessionEvent::Retried => "retry",
            SessionEvent::Reset => "reset",
        }
    }
}

pub fn transition(state: &AnalysisStatus, event: SessionEvent) -> Option<AnalysisStatus> {
    use AnalysisStatus::*;

    match (state, event) {
        (Idle, SessionEvent::FileSelected { attempt }) => Some(Analyzing { attempt }),

        (Analyzing { attempt: current }, SessionEvent::Resolved { attempt, result })
            if *current == attempt =>
        {
            Some(Success {
                attempt,
                result: Box::new(result),
            })
        }

        (Analyzing { attempt: current }, SessionEvent::Rejected { attempt, failure })
            if *current == attempt =>
        {
            Some(Error { attempt, failure })
        }

        (Analyzing { .. }, SessionEvent::Cancelled) => Some(Idle),
        (Error { .. }, SessionEvent::Retried) => Some(Idle),
        (Success { .. }, SessionEvent::Reset) => Some(Idle),

        _ => None,
    }
}

use thiserror::Error;

use crate::llm_client::LlmError;

/// Why one analysis attempt failed.
///
/// Every variant ends the attempt as a whole; there are no partial results.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Gemini API key is not configured. Set GEMINI_API_KEY and restart.")]
    Configuration,

    #[error(transparent)]
    Transport(LlmError),

    #[error("The analysis service returned an empty response")]
    EmptyResponse,

    #[error("The analysis service returned an unexpected format: {0}")]
    MalformedResponse(String),
}

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze resume. Please try again.";

impl AnalysisError {
    /// Message shown to the user in the error state.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Transport(LlmError::Api { message, .. }) if !message.trim().is_empty() => {
                message.clone()
            }
            AnalysisError::Transport(LlmError::Api { .. }) => GENERIC_FAILURE_MESSAGE.to_string(),
            AnalysisError::Transport(err) => {
                let message = err.to_string();
                if message.trim().is_empty() {
                    GENERIC_FAILURE_MESSAGE.to_string()
                } else {
                    message
                }
            }
            other => other.to_string(),
        }
    }

    /// Only a configuration problem cannot be fixed by trying again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, AnalysisError::Configuration)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Configuration => "configuration",
            AnalysisError::Transport(_) => "transport",
            AnalysisError::EmptyResponse => "empty_response",
            AnalysisError::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AnalysisError::Configuration,
            LlmError::EmptyContent => AnalysisError::EmptyResponse,
            LlmError::Parse(e) => AnalysisError::MalformedResponse(e.to_string()),
            other => AnalysisError::Transport(other),
        }
    }
}

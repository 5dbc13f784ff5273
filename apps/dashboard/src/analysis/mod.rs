//! Résumé analysis: sends one PDF to the model with the fixed instruction and
//! response schema, and decodes the reply into an `AnalysisResult`.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`; tests swap in fakes.

pub mod error;
pub mod prompts;
pub mod schema;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use tracing::info;

use crate::llm_client::{GeminiClient, Part, StructuredRequest};
use crate::models::analysis::AnalysisResult;

pub use error::AnalysisError;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Analyzes one résumé document. Implementations perform a single round trip.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, document: Bytes) -> Result<AnalysisResult, AnalysisError>;
}

/// Gemini-backed analyzer using the fixed instruction and response schema.
pub struct GeminiAnalyzer {
    llm: GeminiClient,
    schema: Value,
    instruction: String,
    temperature: f32,
}

impl GeminiAnalyzer {
    pub fn new(llm: GeminiClient, temperature: f32) -> Self {
        Self {
            llm,
            schema: schema::response_schema(),
            instruction: prompts::analysis_instruction(),
            temperature,
        }
    }
}

#[async_trait]
impl ResumeAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, document: Bytes) -> Result<AnalysisResult, AnalysisError> {
        if !self.llm.has_api_key() {
            return Err(AnalysisError::Configuration);
        }

        info!(
            "Submitting {} byte document to {}",
            document.len(),
            self.llm.model()
        );

        let request = StructuredRequest {
            parts: vec![
                Part::inline(PDF_MIME_TYPE, &document),
                Part::text(self.instruction.clone()),
            ],
            schema: &self.schema,
            temperature: self.temperature,
        };

        let result: AnalysisResult = self.llm.call_json(request).await.map_err(|e| {
            tracing::error!("Resume analysis failed: {e}");
            AnalysisError::from(e)
        })?;

        info!(
            "Analysis complete for '{}': ats={}, parsability={}, keywords={}",
            result.candidate_name,
            result.ats_score,
            result.parsability_score,
            result.keyword_match_score
        );

        Ok(result)
    }
}

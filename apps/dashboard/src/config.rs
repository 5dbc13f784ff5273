use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL};

const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const MAX_UPLOAD_BYTES_CEILING: usize = 512 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// The API key is optional here: without it the dashboard still starts, and
/// every analysis attempt fails with a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub analysis_temperature: f32,
    pub max_upload_bytes: usize,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let analysis_temperature = match var("ANALYSIS_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .context("ANALYSIS_TEMPERATURE must be a number")?,
            None => DEFAULT_TEMPERATURE,
        };
        if !(0.0..=2.0).contains(&analysis_temperature) {
            bail!("ANALYSIS_TEMPERATURE must be between 0 and 2, got {analysis_temperature}");
        }

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };
        if max_upload_bytes == 0 || max_upload_bytes > MAX_UPLOAD_BYTES_CEILING {
            bail!(
                "MAX_UPLOAD_BYTES must be between 1 and {MAX_UPLOAD_BYTES_CEILING}, got {max_upload_bytes}"
            );
        }

        Ok(Config {
            gemini_api_key: var("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: var("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            analysis_temperature,
            max_upload_bytes,
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

//! Crate-wide error hierarchy for pr-reviewer.
//!
//! A single root `Error` wraps the two upstream stages (GitHub fetch and
//! Gemini call) plus payload validation. `ReportError` is separate: the
//! review report is advisory and never aborts a cycle.

use ai_llm_service::AiLlmError;
use git_context_engine::GitContextEngineError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type PrResult<T> = Result<T, Error>;

/// Root error type for the pr-reviewer crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Fetching the PR files from GitHub failed.
    #[error("GitHub fetch failed: {0}")]
    Fetch(#[from] GitContextEngineError),

    /// The generative-AI call failed.
    #[error("review request failed: {0}")]
    Llm(#[from] AiLlmError),

    /// A qualifying webhook lacked a field the pipeline needs.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(&'static str),
}

impl Error {
    /// HTTP status of the failing upstream response, when there was one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Error::Fetch(GitContextEngineError::Provider(e)) => e.status(),
            Error::Llm(AiLlmError::Provider(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Why the model's text could not be read as a [`crate::review::report::ReviewReport`].
#[derive(Debug, Error)]
pub enum ReportError {
    /// Text is not JSON of the requested shape.
    #[error("review text is not valid review JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// `overall_score` outside 1..=10.
    #[error("overall_score {0} is outside 1..=10")]
    ScoreOutOfRange(f64),
}

//! Default LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`   = API key (mandatory)
//! - `GEMINI_MODEL`     = model id (default `gemini-2.5-flash`)
//! - `GEMINI_API_BASE`  = API base (default `https://generativelanguage.googleapis.com/v1beta`)
//! - `LLM_MAX_TOKENS`   = optional max output tokens (u32)
//! - `LLM_TEMPERATURE`  = optional sampling temperature (0.0..=2.0)
//! - `LLM_TOP_P`        = optional nucleus sampling cutoff (0.0..=1.0)
//! - `LLM_TIMEOUT_SECS` = request timeout (default 120)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, env_opt_parse, env_opt_u32, env_opt_u64, env_or, must_env,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Constructs the Gemini config used for PR reviews.
///
/// # Errors
///
/// - `ConfigError::MissingVar` if `GEMINI_API_KEY` is missing
/// - `ConfigError::InvalidNumber` for malformed numeric variables
/// - `ConfigError::InvalidFormat` if `GEMINI_API_BASE` is not http(s)
/// - `ConfigError::OutOfRange` if `LLM_TEMPERATURE` is outside `0.0..=2.0`
///   or `LLM_TOP_P` is outside `0.0..=1.0`
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let model = env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let endpoint = env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE);
    validate_http_endpoint("GEMINI_API_BASE", &endpoint)?;

    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    let temperature = env_opt_parse::<f32>("LLM_TEMPERATURE", "expected f32")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0)?;
    }

    let top_p = env_opt_parse::<f32>("LLM_TOP_P", "expected f32")?;
    if let Some(p) = top_p {
        validate_range_f32("top_p", p, 0.0, 1.0)?;
    }

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature,
        top_p,
        timeout_secs: Some(timeout_secs),
    })
}

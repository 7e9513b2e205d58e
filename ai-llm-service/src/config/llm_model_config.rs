use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// Built once at startup (see [`crate::config::default_config::config_gemini`])
/// and owned by the service that talks to the provider.
///
/// # Fields
///
/// - `provider`: Which backend to use.
/// - `model`: The model identifier (e.g., `"gemini-2.5-flash"`).
/// - `endpoint`: API base, e.g. `"https://generativelanguage.googleapis.com/v1beta"`.
/// - `api_key`: API key sent as the `key` query parameter.
/// - `max_tokens`: Maximum number of output tokens (if set).
/// - `temperature`: Sampling temperature (if set).
/// - `top_p`: Nucleus sampling cutoff (if set).
/// - `timeout_secs`: Request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Gemini,
///     model: "gemini-2.5-flash".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
///     api_key: Some("AIza...".to_string()),
///     max_tokens: None,
///     temperature: None,
///     top_p: None,
///     timeout_secs: Some(120),
/// };
/// assert_eq!(cfg.model, "gemini-2.5-flash");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// API base URL (no trailing `/models/...`).
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

//! Generative-AI access for the PR review backend.
//!
//! - [`config`]: model configuration resolved from the environment
//! - [`services::gemini_service`]: non-streaming `generateContent` client
//! - [`error_handler`]: unified error type and env helpers
//! - [`telemetry`]: `tracing-subscriber` layer and filter used by the binary

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, Result};
pub use services::gemini_service::{GeminiService, GenerateOutput};

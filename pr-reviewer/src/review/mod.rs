//! Review request/result types and the stages around the model call.

pub mod log;
pub mod prompt;
pub mod report;

/// Prompt sent to the model; built once per webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub prompt_text: String,
}

/// Text returned by the model; `None` when the reply had no candidate text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewResult {
    pub raw_text: Option<String>,
}

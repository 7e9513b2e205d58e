//! Source-control provider access.
//!
//! Only GitHub (REST v3) is supported. The client is built once from a
//! [`ProviderConfig`] and shared by every webhook handling cycle.

pub mod types;
pub use types::*;

pub mod github;

/// Default GitHub REST API base.
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

/// User agent GitHub sees on every request.
pub const DEFAULT_USER_AGENT: &str = "ai-reviewer";

/// Runtime configuration for the provider client.
///
/// Usually injected from environment by the HTTP layer.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API base, e.g. "https://api.github.com".
    pub base_api: String,
    /// Access token, sent as `Authorization: Bearer <token>`.
    pub token: String,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ProviderConfig {
    /// Config pointing at public GitHub with the default user agent.
    pub fn github(token: impl Into<String>) -> Self {
        Self {
            base_api: DEFAULT_GITHUB_API_BASE.to_string(),
            token: token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

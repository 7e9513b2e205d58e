use ai_llm_service::{
    AiLlmError, GeminiService, LlmModelConfig,
    config::default_config,
    error_handler::{env_opt, env_opt_parse, env_or, must_env},
};
use git_context_engine::{
    GitHubClient, ProviderConfig,
    git_providers::{DEFAULT_GITHUB_API_BASE, DEFAULT_USER_AGENT},
};
use thiserror::Error;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::info;

use crate::error_handler::AppResult;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONCURRENT_REVIEWS: usize = 4;

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing or malformed environment variable.
    #[error(transparent)]
    Env(#[from] AiLlmError),

    #[error("REVIEW_MAX_CONCURRENCY must be at least 1")]
    ZeroConcurrency,
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind, e.g. "0.0.0.0:3000".
    pub listen_address: String,
    /// GitHub API base, token and user agent.
    pub github: ProviderConfig,
    /// Gemini model configuration.
    pub llm: LlmModelConfig,
    /// Upper bound on review pipelines running at once.
    pub max_concurrent_reviews: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `API_ADDRESS` wins over `PORT`; `GITHUB_TOKEN` and `GEMINI_API_KEY`
    /// are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_address = match env_opt("API_ADDRESS") {
            Some(addr) => addr,
            None => {
                let port = env_opt_parse::<u16>("PORT", "expected u16 (1..=65535)")?
                    .unwrap_or(DEFAULT_PORT);
                format!("0.0.0.0:{port}")
            }
        };

        let github = ProviderConfig {
            base_api: env_or("GITHUB_API_BASE", DEFAULT_GITHUB_API_BASE),
            token: must_env("GITHUB_TOKEN")?,
            user_agent: env_or("GITHUB_USER_AGENT", DEFAULT_USER_AGENT),
        };

        let llm = default_config::config_gemini()?;

        let max_concurrent_reviews = env_opt_parse::<usize>(
            "REVIEW_MAX_CONCURRENCY",
            "expected a positive integer",
        )?
        .unwrap_or(DEFAULT_MAX_CONCURRENT_REVIEWS);
        if max_concurrent_reviews == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(Self {
            listen_address,
            github,
            llm,
            max_concurrent_reviews,
        })
    }
}

/// Shared state for all HTTP handlers.
///
/// Clients are built once; each webhook borrows them for one review cycle.
pub struct AppState {
    pub github: GitHubClient,
    pub llm: GeminiService,
    review_permits: Semaphore,
}

impl AppState {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let github = GitHubClient::from_config(config.github.clone())?;
        let llm = GeminiService::new(config.llm.clone())?;

        info!(
            github_api = %config.github.base_api,
            model = %config.llm.model,
            max_concurrent_reviews = config.max_concurrent_reviews,
            "application state ready"
        );

        Ok(Self {
            github,
            llm,
            review_permits: Semaphore::new(config.max_concurrent_reviews.max(1)),
        })
    }

    /// Waits for a free review slot. `None` only if the semaphore was closed.
    pub async fn acquire_review_permit(&self) -> Option<SemaphorePermit<'_>> {
        self.review_permits.acquire().await.ok()
    }
}

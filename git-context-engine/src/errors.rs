//! Crate-wide error hierarchy for git-context-engine.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type GitContextEngineResult<T> = Result<T, GitContextEngineError>;

/// Max chars of an upstream body kept inside an error.
const BODY_SNIPPET_MAX_CHARS: usize = 2048;

/// Root error type for the git-context-engine crate.
#[derive(Debug, Error)]
pub enum GitContextEngineError {
    /// Provider (GitHub) related failure.
    #[error(transparent)]
    Provider(#[from] GitContextEngineProviderError),

    /// Configuration problems (missing token, bad base URL).
    #[error(transparent)]
    Config(#[from] GitContextEngineConfigError),

    /// Input validation errors (bad repo identifier).
    #[error("validation error: {0}")]
    Validation(String),
}

/// Provider-specific error used inside the provider layer.
///
/// Status variants carry a trimmed copy of the response body so that callers
/// can log what GitHub actually said (e.g. `Bad credentials`).
#[derive(Debug, Error)]
pub enum GitContextEngineProviderError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized: {body}")]
    Unauthorized { body: String },

    /// Forbidden (HTTP 403).
    #[error("forbidden: {body}")]
    Forbidden { body: String },

    /// Not found (HTTP 404).
    #[error("not found: {body}")]
    NotFound { body: String },

    /// Rate limited (HTTP 429).
    #[error("rate limited (retry after {retry_after_secs:?}s): {body}")]
    RateLimited {
        /// `Retry-After` hint in seconds when available.
        retry_after_secs: Option<u64>,
        body: String,
    },

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {status}: {body}")]
    Server { status: u16, body: String },

    /// Other HTTP status (non-2xx) not covered by specific variants.
    #[error("http status error: status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of provider response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl GitContextEngineProviderError {
    /// Maps a non-2xx status plus its body into a provider error.
    pub fn from_status(status: u16, retry_after_secs: Option<u64>, body: &str) -> Self {
        let body = snippet(body);
        match status {
            401 => Self::Unauthorized { body },
            403 => Self::Forbidden { body },
            404 => Self::NotFound { body },
            429 => Self::RateLimited {
                retry_after_secs,
                body,
            },
            500..=599 => Self::Server { status, body },
            _ => Self::HttpStatus { status, body },
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Server { status, .. } | Self::HttpStatus { status, .. } => Some(*status),
            Self::Timeout | Self::Network(_) | Self::InvalidResponse(_) => None,
        }
    }
}

/// Configuration and setup errors (base API URL, missing token, etc.).
#[derive(Debug, Error)]
pub enum GitContextEngineConfigError {
    /// Missing required provider access token.
    #[error("missing provider token")]
    MissingToken,

    /// Invalid base API URL.
    #[error("invalid base api url: {0}")]
    InvalidBaseUrl(String),

    /// HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    Client(String),
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<reqwest::Error> for GitContextEngineError {
    fn from(e: reqwest::Error) -> Self {
        GitContextEngineError::Provider(GitContextEngineProviderError::from(e))
    }
}

// ===== Mapping from reqwest::Error into GitContextEngineProviderError =====

impl From<reqwest::Error> for GitContextEngineProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return GitContextEngineProviderError::Timeout;
        }

        if e.is_decode() {
            return GitContextEngineProviderError::InvalidResponse(e.to_string());
        }

        if let Some(status) = e.status() {
            return GitContextEngineProviderError::from_status(status.as_u16(), None, "");
        }

        GitContextEngineProviderError::Network(e.to_string())
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_SNIPPET_MAX_CHARS) {
        Some((idx, _)) => format!("{}…", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_statuses_to_variants() {
        use GitContextEngineProviderError as P;

        assert!(matches!(
            P::from_status(401, None, "Bad credentials"),
            P::Unauthorized { body } if body == "Bad credentials"
        ));
        assert!(matches!(P::from_status(403, None, ""), P::Forbidden { .. }));
        assert!(matches!(P::from_status(404, None, ""), P::NotFound { .. }));
        assert!(matches!(
            P::from_status(429, Some(30), ""),
            P::RateLimited {
                retry_after_secs: Some(30),
                ..
            }
        ));
        assert!(matches!(
            P::from_status(502, None, ""),
            P::Server { status: 502, .. }
        ));
        assert!(matches!(
            P::from_status(422, None, ""),
            P::HttpStatus { status: 422, .. }
        ));
    }

    #[test]
    fn status_round_trips_for_http_variants() {
        for code in [401u16, 403, 404, 429, 418, 503] {
            let err = GitContextEngineProviderError::from_status(code, None, "x");
            assert_eq!(err.status(), Some(code));
        }
        assert_eq!(GitContextEngineProviderError::Timeout.status(), None);
    }

    #[test]
    fn body_is_kept_in_message() {
        let body = "  {\"message\":\"Bad credentials\"}\n";
        let err: GitContextEngineError =
            GitContextEngineProviderError::from_status(401, None, body).into();
        assert_eq!(
            err.to_string(),
            "unauthorized: {\"message\":\"Bad credentials\"}"
        );
    }
}

//! GitHub provider (REST v3) for pull-request file listings.
//!
//! Endpoint used:
//!   * GET /repos/{owner}/{repo}/pulls/{number}/files?per_page=100

use std::time::Instant;

use reqwest::{Client, header};
use tracing::{debug, warn};

use crate::errors::{
    GitContextEngineConfigError, GitContextEngineError, GitContextEngineProviderError,
    GitContextEngineResult,
};
use crate::git_providers::ProviderConfig;
use crate::git_providers::types::{FileChange, PullRequestId};

/// Page size requested from the files endpoint (GitHub maximum).
pub const FILES_PER_PAGE: usize = 100;

/// GitHub HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_api: String,
    token: String,
}

impl GitHubClient {
    /// Constructs a GitHub client with a shared HTTP instance and auth token.
    pub fn new(http: Client, base_api: String, token: String) -> Self {
        debug!("Creating GitHubClient with base_api={}", base_api);
        Self {
            http,
            base_api: base_api.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Builds the underlying `reqwest::Client` (user agent) and validates config.
    pub fn from_config(cfg: ProviderConfig) -> GitContextEngineResult<Self> {
        if cfg.token.trim().is_empty() {
            return Err(GitContextEngineConfigError::MissingToken.into());
        }
        let base = cfg.base_api.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GitContextEngineConfigError::InvalidBaseUrl(cfg.base_api).into());
        }

        let http = Client::builder()
            .user_agent(cfg.user_agent)
            .build()
            .map_err(|e| GitContextEngineConfigError::Client(e.to_string()))?;

        Ok(Self::new(http, base.to_string(), cfg.token))
    }

    /// Lists changed files of a pull request, in the order GitHub returns them.
    ///
    /// Only the first page (up to [`FILES_PER_PAGE`] files) is read; a full
    /// page is logged as possibly truncated.
    pub async fn list_pull_request_files(
        &self,
        id: &PullRequestId,
    ) -> GitContextEngineResult<Vec<FileChange>> {
        let started = Instant::now();
        let (owner, repo) = split_owner_repo(&id.repo_full_name)?;
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.base_api,
            urlencoding::encode(&owner),
            urlencoding::encode(&repo),
            id.number
        );
        debug!("GitHub list_pull_request_files: {}", url);

        let resp = self
            .http
            .get(&url)
            .query(&[("per_page", FILES_PER_PAGE)])
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let retry_after = resp
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = resp.text().await.unwrap_or_default();
            return Err(GitContextEngineProviderError::from_status(
                status.as_u16(),
                retry_after,
                &body,
            )
            .into());
        }

        let bytes = resp.bytes().await?;
        let files: Vec<FileChange> = serde_json::from_slice(&bytes).map_err(|e| {
            GitContextEngineProviderError::InvalidResponse(format!(
                "expected an array of PR files: {e}"
            ))
        })?;

        if files.len() >= FILES_PER_PAGE {
            warn!(
                repo = %id.repo_full_name,
                pr = id.number,
                files = files.len(),
                "files listing returned a full page; later pages are not fetched and the diff may be truncated"
            );
        }

        debug!(
            repo = %id.repo_full_name,
            pr = id.number,
            files = files.len(),
            latency_ms = started.elapsed().as_millis(),
            "GitHub files listing fetched"
        );

        Ok(files)
    }
}

/// Splits "owner/repo" into components or returns a validation error.
fn split_owner_repo(project: &str) -> GitContextEngineResult<(String, String)> {
    let mut parts = project.split('/');
    let owner = parts.next().unwrap_or("").trim();
    let repo = parts.next().unwrap_or("").trim();

    if owner.is_empty() || repo.is_empty() || parts.next().is_some() {
        return Err(GitContextEngineError::Validation(format!(
            "invalid GitHub repository '{}', expected 'owner/repo'",
            project
        )));
    }

    Ok((owner.to_string(), repo.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_owner_and_repo() {
        assert_eq!(
            split_owner_repo("octo-org/hello-world").unwrap(),
            ("octo-org".to_string(), "hello-world".to_string())
        );
    }

    #[test]
    fn rejects_malformed_repo_names() {
        for bad in ["", "octo", "/repo", "owner/", "a/b/c"] {
            assert!(
                matches!(split_owner_repo(bad), Err(GitContextEngineError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn from_config_validates_token_and_base() {
        let mut cfg = ProviderConfig::github("");
        assert!(matches!(
            GitHubClient::from_config(cfg.clone()),
            Err(GitContextEngineError::Config(GitContextEngineConfigError::MissingToken))
        ));

        cfg.token = "ghp_test".into();
        cfg.base_api = "api.github.com".into();
        assert!(matches!(
            GitHubClient::from_config(cfg.clone()),
            Err(GitContextEngineError::Config(GitContextEngineConfigError::InvalidBaseUrl(_)))
        ));

        cfg.base_api = "https://api.github.com/".into();
        let client = GitHubClient::from_config(cfg).unwrap();
        assert_eq!(client.base_api, "https://api.github.com");
    }

    #[test]
    fn decodes_files_listing_with_missing_patch() {
        let raw = r#"[
            {"sha":"1","filename":"a.js","status":"modified","additions":1,"patch":"+1"},
            {"sha":"2","filename":"logo.png","status":"added"},
            {"sha":"3","filename":"b.js","status":"modified","patch":null}
        ]"#;
        let files: Vec<FileChange> = serde_json::from_str(raw).unwrap();
        assert_eq!(files.len(), 3);
        assert_eq!(files[0].patch_text(), Some("+1"));
        assert_eq!(files[1].patch, None);
        assert_eq!(files[2].patch, None);
        assert_eq!(files[1].status.as_deref(), Some("added"));
    }
}

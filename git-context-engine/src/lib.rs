pub mod diff;
pub mod errors;
pub mod git_providers;

pub use diff::{aggregate_patches, count_with_patch};
pub use errors::{GitContextEngineError, GitContextEngineResult};
pub use git_providers::{FileChange, ProviderConfig, PullRequestId, github::GitHubClient};

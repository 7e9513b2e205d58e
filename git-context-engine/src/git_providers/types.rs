//! Data model for pull requests and their changed files.

use serde::{Deserialize, Serialize};

/// A unique reference to a pull request.
///
/// * `repo_full_name` – "owner/repo"
/// * `number`         – PR number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestId {
    pub repo_full_name: String,
    pub number: u64,
}

/// One entry of `GET /repos/{owner}/{repo}/pulls/{number}/files`.
///
/// `patch` is absent for binary files and for diffs GitHub deems too large.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub filename: String,
    #[serde(default)]
    pub patch: Option<String>,
    /// "added" | "removed" | "modified" | "renamed" | ...
    #[serde(default)]
    pub status: Option<String>,
}

impl FileChange {
    /// Patch text when present and non-empty.
    pub fn patch_text(&self) -> Option<&str> {
        self.patch.as_deref().filter(|p| !p.is_empty())
    }
}

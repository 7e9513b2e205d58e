//! Public entry for the pr-reviewer pipeline.
//!
//! One webhook delivery that passed the [`event`] filter runs, in order:
//!
//! 1) **Fetch**: list the PR's changed files from GitHub (one page)
//! 2) **Aggregate**: join patches into `"\nFile: <name>\n<patch>\n"` blocks
//! 3) **Request**: embed the blob in the mentor prompt and call Gemini once
//! 4) **Log**: print the first candidate text and a parsed summary if any
//!
//! Each step depends on the previous one; there is no parallelism, retry or
//! caching. Errors surface through [`errors::Error`] for the caller to log.

pub mod errors;
pub mod event;
pub mod review;

use std::time::Instant;

use ai_llm_service::GeminiService;
use git_context_engine::{GitHubClient, aggregate_patches, count_with_patch};
use tracing::{debug, info, instrument};

use errors::PrResult;
use event::WebhookEvent;
use review::{ReviewRequest, ReviewResult, log::log_review_result, report::ReviewReport};

/// What one review cycle produced.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    /// Files listed by GitHub.
    pub files_total: usize,
    /// Files that contributed a patch to the prompt.
    pub files_with_patch: usize,
    /// Raw model text.
    pub result: ReviewResult,
    /// Typed report when the text matched the requested JSON.
    pub report: Option<ReviewReport>,
}

/// Runs fetch → aggregate → request → log for one qualifying event.
///
/// # Errors
/// - [`errors::Error::Fetch`] when the GitHub files listing fails
/// - [`errors::Error::Llm`] when the Gemini call fails
#[instrument(
    name = "run_review",
    skip_all,
    fields(repo = %event.repo_full_name, pr = event.pr_number, action = %event.action)
)]
pub async fn run_review(
    github: &GitHubClient,
    llm: &GeminiService,
    event: &WebhookEvent,
) -> PrResult<ReviewOutcome> {
    let t0 = Instant::now();
    info!("PR triggered, fetching PR diff");

    let files = github.list_pull_request_files(&event.pull_request_id()).await?;
    let diff = aggregate_patches(&files);
    let files_with_patch = count_with_patch(&files);
    debug!(
        files = files.len(),
        files_with_patch,
        diff_len = diff.len(),
        "diff aggregated"
    );

    let request = ReviewRequest::for_diff(&diff);
    info!(
        model = %llm.model(),
        prompt_len = request.prompt_text.len(),
        "sending patch to Gemini"
    );

    let output = llm.generate(&request.prompt_text).await?;
    let result = ReviewResult {
        raw_text: output.text,
    };
    let report = log_review_result(&result);

    info!(
        total_ms = t0.elapsed().as_millis(),
        has_text = result.raw_text.is_some(),
        "review cycle finished"
    );

    Ok(ReviewOutcome {
        files_total: files.len(),
        files_with_patch,
        result,
        report,
    })
}

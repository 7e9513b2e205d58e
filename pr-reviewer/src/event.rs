//! Webhook event filter.
//!
//! Only `pull_request` deliveries with action `opened` or `synchronize`
//! start a review; everything else is acknowledged without outbound calls.

use git_context_engine::PullRequestId;
use serde::Deserialize;

use crate::errors::{Error, PrResult};

/// Value of `X-GitHub-Event` for pull-request deliveries.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Actions that trigger a review.
pub const REVIEWABLE_ACTIONS: [&str; 2] = ["opened", "synchronize"];

/// Subset of the GitHub webhook body the filter looks at.
///
/// Every field is optional so that unrelated event shapes still decode.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub pull_request: Option<PullRequestPayload>,
    #[serde(default)]
    pub repository: Option<RepositoryPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PullRequestPayload {
    #[serde(default)]
    pub number: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RepositoryPayload {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A delivery that passed the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub event_type: String,
    pub action: String,
    pub repo_full_name: String,
    pub pr_number: u64,
}

/// `true` for `pull_request` + `opened`/`synchronize`.
pub fn is_reviewable(event_type: &str, action: Option<&str>) -> bool {
    event_type == PULL_REQUEST_EVENT && action.is_some_and(|a| REVIEWABLE_ACTIONS.contains(&a))
}

impl WebhookEvent {
    /// Applies the filter to one delivery.
    ///
    /// Returns `Ok(None)` for deliveries that should only be acknowledged and
    /// an error when a reviewable delivery lacks the PR number or repo name.
    pub fn from_delivery(event_type: &str, payload: WebhookPayload) -> PrResult<Option<Self>> {
        let action = match payload.action {
            Some(a) if is_reviewable(event_type, Some(&a)) => a,
            _ => return Ok(None),
        };

        let pr_number = payload
            .pull_request
            .and_then(|p| p.number)
            .ok_or(Error::InvalidPayload("missing pull_request.number"))?;

        let repo_full_name = payload
            .repository
            .and_then(|r| r.full_name)
            .filter(|n| !n.trim().is_empty())
            .ok_or(Error::InvalidPayload("missing repository.full_name"))?;

        Ok(Some(Self {
            event_type: event_type.to_string(),
            action,
            repo_full_name,
            pr_number,
        }))
    }

    /// Identifier used by the GitHub client.
    pub fn pull_request_id(&self) -> PullRequestId {
        PullRequestId {
            repo_full_name: self.repo_full_name.clone(),
            number: self.pr_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(v).unwrap()
    }

    fn pr_body(action: &str) -> serde_json::Value {
        json!({
            "action": action,
            "number": 7,
            "pull_request": { "number": 7, "title": "Add feature" },
            "repository": { "full_name": "octo-org/hello-world" }
        })
    }

    #[test]
    fn accepts_opened_and_synchronize() {
        for action in ["opened", "synchronize"] {
            let ev = WebhookEvent::from_delivery("pull_request", payload(pr_body(action)))
                .unwrap()
                .unwrap();
            assert_eq!(ev.action, action);
            assert_eq!(ev.repo_full_name, "octo-org/hello-world");
            assert_eq!(ev.pr_number, 7);
            assert_eq!(
                ev.pull_request_id(),
                PullRequestId {
                    repo_full_name: "octo-org/hello-world".into(),
                    number: 7
                }
            );
        }
    }

    #[test]
    fn ignores_other_actions_and_events() {
        for action in ["closed", "edited", "reopened", "labeled"] {
            assert_eq!(
                WebhookEvent::from_delivery("pull_request", payload(pr_body(action))).unwrap(),
                None
            );
        }
        for event in ["push", "issues", "pull_request_review", "ping", ""] {
            assert_eq!(
                WebhookEvent::from_delivery(event, payload(pr_body("opened"))).unwrap(),
                None
            );
        }
        assert_eq!(
            WebhookEvent::from_delivery("pull_request", payload(json!({}))).unwrap(),
            None
        );
    }

    #[test]
    fn irrelevant_events_need_no_pr_fields() {
        let push = payload(json!({ "ref": "refs/heads/main", "commits": [] }));
        assert_eq!(WebhookEvent::from_delivery("push", push).unwrap(), None);
    }

    #[test]
    fn reviewable_event_without_pr_fields_is_invalid() {
        let no_pr = payload(json!({ "action": "opened", "repository": { "full_name": "a/b" } }));
        assert!(matches!(
            WebhookEvent::from_delivery("pull_request", no_pr),
            Err(Error::InvalidPayload("missing pull_request.number"))
        ));

        let no_repo = payload(json!({ "action": "opened", "pull_request": { "number": 1 } }));
        assert!(matches!(
            WebhookEvent::from_delivery("pull_request", no_repo),
            Err(Error::InvalidPayload("missing repository.full_name"))
        ));
    }

    #[test]
    fn filter_is_case_sensitive() {
        assert!(!is_reviewable("Pull_Request", Some("opened")));
        assert!(!is_reviewable("pull_request", Some("Opened")));
        assert!(!is_reviewable("pull_request", None));
        assert!(is_reviewable("pull_request", Some("synchronize")));
    }
}

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use pr_reviewer::{
    event::{WebhookEvent, WebhookPayload},
    run_review,
};
use tracing::{Span, debug, error, field, info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
};

pub const GITHUB_EVENT_HEADER: &str = "x-github-event";
pub const GITHUB_DELIVERY_HEADER: &str = "x-github-delivery";

const ACK: &str = "OK";

/// Receives GitHub webhook deliveries.
///
/// Qualifying `pull_request` events run a full review before the response is
/// sent. Review failures are logged and never change the acknowledgement.
#[instrument(
    name = "github_webhook_route",
    skip_all,
    fields(event = field::Empty, delivery = field::Empty)
)]
pub async fn github_webhook_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, &'static str)> {
    let event_type = header_str(&headers, GITHUB_EVENT_HEADER).unwrap_or_default();
    let span = Span::current();
    span.record("event", event_type);
    if let Some(id) = header_str(&headers, GITHUB_DELIVERY_HEADER) {
        span.record("delivery", id);
    }

    let payload = parse_payload(&headers, &body)?;
    let action = payload.action.clone();

    let event = match WebhookEvent::from_delivery(event_type, payload) {
        Ok(Some(event)) => event,
        Ok(None) => {
            debug!(action = action.as_deref().unwrap_or(""), "delivery ignored");
            return Ok((StatusCode::OK, ACK));
        }
        Err(e) => return Err(AppError::BadRequest(e.to_string())),
    };

    let Some(_permit) = state.acquire_review_permit().await else {
        error!("review permits closed, skipping review");
        return Ok((StatusCode::OK, ACK));
    };

    match run_review(&state.github, &state.llm, &event).await {
        Ok(outcome) => info!(
            files = outcome.files_total,
            files_with_patch = outcome.files_with_patch,
            "delivery handled"
        ),
        Err(err) => error!(
            error = %err,
            status = err.upstream_status(),
            repo = %event.repo_full_name,
            pr = event.pr_number,
            "review failed"
        ),
    }

    Ok((StatusCode::OK, ACK))
}

/// Decodes JSON deliveries only.
///
/// Bodies with another content type (GitHub's form-encoded format included)
/// and empty bodies read as an empty payload, which the filter then ignores.
fn parse_payload(headers: &HeaderMap, body: &[u8]) -> AppResult<WebhookPayload> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WebhookPayload::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid webhook payload: {e}")))
}

/// `true` when the media type is `application/json`, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    header_str(headers, header::CONTENT_TYPE.as_str())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn empty_body_is_an_empty_payload() {
        let p = parse_payload(&content_type("application/json"), b"").unwrap();
        assert!(p.action.is_none());
        assert!(p.pull_request.is_none());
    }

    #[test]
    fn malformed_json_body_is_rejected() {
        assert!(matches!(
            parse_payload(&content_type("application/json"), b"{not json"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn json_media_type_ignores_parameters_and_case() {
        let body = br#"{"action": "opened"}"#;
        for ct in ["application/json; charset=utf-8", "Application/JSON"] {
            let p = parse_payload(&content_type(ct), body).unwrap();
            assert_eq!(p.action.as_deref(), Some("opened"), "{ct}");
        }
    }

    #[test]
    fn non_json_bodies_read_as_empty_payload() {
        let form = b"payload=%7B%22action%22%3A%22opened%22%7D";
        let p = parse_payload(&content_type("application/x-www-form-urlencoded"), form).unwrap();
        assert!(p.action.is_none());

        let p = parse_payload(&HeaderMap::new(), br#"{"action": "opened"}"#).unwrap();
        assert!(p.action.is_none());
    }

    #[test]
    fn unrelated_payload_shapes_decode() {
        let p = parse_payload(
            &content_type("application/json"),
            br#"{"zen": "Keep it logically awesome.", "hook_id": 1}"#,
        )
        .unwrap();
        assert!(p.action.is_none());
    }
}

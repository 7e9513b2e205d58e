//! Gemini service for text generation.
//!
//! Minimal, non-streaming client around the Gemini REST API (AI Studio `v1beta`).
//! The endpoint is derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/models/{model}:generateContent?key={api_key}
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Gemini`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! The response is not validated beyond JSON decoding: a reply without
//! candidates or text parts yields `GenerateOutput { text: None, .. }`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{
        default_config::DEFAULT_TIMEOUT_SECS, llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::{
        AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
};

/// Result of a single `generateContent` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    /// Text of the first part of the first candidate, when present.
    pub text: Option<String>,
    /// Number of candidates returned by the model.
    pub candidate_count: usize,
    /// `finishReason` of the first candidate (e.g. `STOP`, `SAFETY`).
    pub finish_reason: Option<String>,
}

/// Thin client for the Gemini API.
///
/// Constructed from a complete [`LlmModelConfig`]. Keeps a preconfigured
/// `reqwest::Client` (timeout + JSON content type); clone-free sharing goes
/// through `Arc` at the application level.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    api_key: String,
    url_generate: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Gemini
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None` or blank
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(
                ProviderError::new(Provider::Gemini, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::new(Provider::Gemini, ProviderErrorKind::MissingApiKey)
            })?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout_secs = cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        let model = cfg.model.trim().trim_start_matches("models/");
        let url_generate = format!("{base}/models/{model}:generateContent");

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs,
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            api_key,
            url_generate,
        })
    }

    /// Model identifier this service sends requests to.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Performs a single non-streaming `generateContent` request.
    ///
    /// The API key travels in the query string, so transport errors are
    /// stripped of their URL before they leave this function.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the body is not JSON
    pub async fn generate(&self, prompt: &str) -> Result<GenerateOutput, AiLlmError> {
        let started = Instant::now();
        let body = GenerateContentRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let raw = resp.bytes().await.map_err(reqwest::Error::without_url)?;
        let out: GenerateContentResponse = serde_json::from_slice(&raw).map_err(|e| {
            error!(
                error = %e,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode generateContent response"
            );
            ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; body: {}",
                    make_snippet(&String::from_utf8_lossy(&raw))
                )),
            )
        })?;

        let output = out.into_output();

        info!(
            model = %self.cfg.model,
            candidates = output.candidate_count,
            finish_reason = output.finish_reason.as_deref().unwrap_or("-"),
            has_text = output.text.is_some(),
            latency_ms = started.elapsed().as_millis(),
            "generateContent completed"
        );

        Ok(output)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<ContentIn<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single user turn with one text part; generation options only when configured.
    fn from_cfg(cfg: &LlmModelConfig, prompt: &'a str) -> Self {
        let generation_config = GenerationConfig {
            max_output_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
        };

        Self {
            contents: vec![ContentIn {
                parts: vec![PartIn { text: prompt }],
            }],
            generation_config: (!generation_config.is_empty()).then_some(generation_config),
        }
    }
}

#[derive(Debug, Serialize)]
struct ContentIn<'a> {
    parts: Vec<PartIn<'a>>,
}

#[derive(Debug, Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.max_output_tokens.is_none() && self.temperature.is_none() && self.top_p.is_none()
    }
}

/// Response for `generateContent` (subset). Every level is optional.
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ContentOut>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, or `None` anywhere along the path.
    fn into_output(self) -> GenerateOutput {
        let candidate_count = self.candidates.len();
        let Some(first) = self.candidates.into_iter().next() else {
            return GenerateOutput {
                text: None,
                candidate_count,
                finish_reason: None,
            };
        };

        let text = first
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);

        GenerateOutput {
            text,
            candidate_count,
            finish_reason: first.finish_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/".into(),
            api_key: Some("test-key".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    fn decode(v: serde_json::Value) -> GenerateOutput {
        serde_json::from_value::<GenerateContentResponse>(v)
            .unwrap()
            .into_output()
    }

    #[test]
    fn builds_generate_url_from_endpoint_and_model() {
        let svc = GeminiService::new(cfg()).unwrap();
        assert_eq!(
            svc.url_generate,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(svc.model(), "gemini-2.5-flash");
    }

    #[test]
    fn rejects_missing_key_and_bad_endpoint() {
        let mut no_key = cfg();
        no_key.api_key = Some("  ".into());
        assert!(matches!(
            GeminiService::new(no_key),
            Err(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey,
                ..
            }))
        ));

        let mut bad = cfg();
        bad.endpoint = "generativelanguage.googleapis.com".into();
        assert!(matches!(
            GeminiService::new(bad),
            Err(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::InvalidEndpoint(_),
                ..
            }))
        ));
    }

    #[test]
    fn request_body_is_single_text_part_without_options() {
        let c = cfg();
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&c, "review me")).unwrap();
        assert_eq!(
            body,
            json!({ "contents": [ { "parts": [ { "text": "review me" } ] } ] })
        );
    }

    #[test]
    fn request_body_carries_configured_options() {
        let mut c = cfg();
        c.max_tokens = Some(1024);
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&c, "x")).unwrap();
        assert_eq!(body["generationConfig"], json!({ "maxOutputTokens": 1024 }));

        c.top_p = Some(0.5);
        let body = serde_json::to_value(GenerateContentRequest::from_cfg(&c, "x")).unwrap();
        assert_eq!(body["generationConfig"], json!({ "maxOutputTokens": 1024, "topP": 0.5 }));
    }

    #[test]
    fn extracts_first_part_of_first_candidate() {
        let out = decode(json!({
            "candidates": [
                { "content": { "parts": [ { "text": "first" }, { "text": "second" } ] }, "finishReason": "STOP" },
                { "content": { "parts": [ { "text": "other" } ] } }
            ]
        }));
        assert_eq!(out.text.as_deref(), Some("first"));
        assert_eq!(out.candidate_count, 2);
        assert_eq!(out.finish_reason.as_deref(), Some("STOP"));
    }

    #[tokio::test]
    async fn transport_errors_do_not_carry_the_api_key() {
        let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = closed.local_addr().unwrap();
        drop(closed);

        let mut c = cfg();
        c.endpoint = format!("http://{addr}/v1beta");
        c.api_key = Some("SECRET-KEY-123".into());
        let svc = GeminiService::new(c).unwrap();

        let err = svc.generate("x").await.unwrap_err();
        assert!(matches!(err, AiLlmError::HttpTransport(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"), "{err}");
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }

    #[test]
    fn empty_or_partial_responses_yield_no_text() {
        assert_eq!(decode(json!({ "candidates": [] })).text, None);
        assert_eq!(decode(json!({})).text, None);

        let blocked = decode(json!({ "candidates": [ { "finishReason": "SAFETY" } ] }));
        assert_eq!(blocked.text, None);
        assert_eq!(blocked.candidate_count, 1);

        let no_parts = decode(json!({ "candidates": [ { "content": { "parts": [] } } ] }));
        assert_eq!(no_parts.text, None);
    }
}

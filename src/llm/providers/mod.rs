//! HTTP client for the upstream completion service.
//!
//! All wire types are private to the per-shape modules; callers hand over a
//! [`Strategy`] and get back the raw JSON body.

mod chat_completions;
mod responses;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, trace, warn};

use crate::config::Config;
use crate::llm::{ProviderError, Strategy};

use chat_completions::ChatCompletionRequest;
use responses::ResponsesRequest;

/// Longest error body carried into [`ProviderError::Status`] when it is not a
/// recognised error envelope.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Shared, stateless client for both request shapes.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    chat_completions_url: String,
    responses_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_seconds: u64,
    api_key: Option<String>,
    debug: bool,
}

impl CompletionClient {
    /// Build a client from the upstream section, credential and debug flag.
    ///
    /// When `api_key` is present it is sent as `Authorization: Bearer <key>`
    /// on every request.
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let upstream = &config.upstream;
        let client = Client::builder()
            .timeout(Duration::from_secs(upstream.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self {
            client,
            chat_completions_url: upstream.chat_completions_url.clone(),
            responses_url: upstream.responses_url.clone(),
            model: upstream.model.clone(),
            temperature: upstream.temperature,
            max_tokens: upstream.max_tokens,
            timeout_seconds: upstream.timeout_seconds,
            api_key: config.api_key.clone(),
            debug: config.debug,
        })
    }

    /// One round-trip using `strategy`. Returns the parsed response body of a
    /// successful (2xx) call; extraction is left to the caller.
    pub async fn send(&self, strategy: &Strategy, system: &str, question: &str) -> Result<Value, ProviderError> {
        match strategy {
            Strategy::ChatCompletions => {
                let body = ChatCompletionRequest::new(
                    &self.model,
                    system,
                    question,
                    self.temperature,
                    self.max_tokens,
                );
                self.post(strategy.name(), &self.chat_completions_url, &body).await
            }
            Strategy::Responses { vector_store_id } => {
                let body = ResponsesRequest::new(
                    &self.model,
                    system,
                    question,
                    self.temperature,
                    self.max_tokens,
                    vector_store_id.as_deref(),
                );
                self.post(strategy.name(), &self.responses_url, &body).await
            }
        }
    }

    async fn post<B: Serialize>(&self, strategy: &'static str, url: &str, body: &B) -> Result<Value, ProviderError> {
        debug!(strategy, %url, model = %self.model, "sending upstream request");
        self.log_payload(strategy, "request", || {
            serde_json::to_string_pretty(body).unwrap_or_else(|e| format!("<serialization failed: {e}>"))
        });

        let mut req = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("timed out after {}s", self.timeout_seconds)
            } else {
                e.to_string()
            };
            warn!(strategy, %url, error = %message, "upstream request failed (transport)");
            ProviderError::Transport { strategy, message }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ProviderError::Transport {
            strategy,
            message: format!("failed to read response body: {e}"),
        })?;

        self.log_payload(strategy, "response", || text.clone());

        if !status.is_success() {
            let message = error_message(&text);
            warn!(strategy, %status, %message, "upstream returned HTTP error");
            return Err(ProviderError::Status { strategy, status, message });
        }

        serde_json::from_str::<Value>(&text).map_err(|e| ProviderError::Decode {
            strategy,
            message: e.to_string(),
        })
    }

    /// Raw payloads go to `info` when `DEBUG_OPENAI=1`, otherwise to `trace`.
    /// The closure only runs when the event would actually be recorded.
    fn log_payload(&self, strategy: &'static str, kind: &'static str, render: impl FnOnce() -> String) {
        if self.debug {
            info!(strategy, kind, payload = %render(), "upstream payload");
        } else if tracing::enabled!(tracing::Level::TRACE) {
            trace!(strategy, kind, payload = %render(), "upstream payload");
        }
    }
}

// Error envelope used by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<Value>,
}

/// Human-readable summary of a non-2xx body.
fn error_message(body: &str) -> String {
    if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(body) {
        let code = env
            .error
            .code
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => format!(" [code={s}]"),
                other => format!(" [code={other}]"),
            })
            .unwrap_or_default();
        return format!("{}{code}", env.error.message);
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return format!("{head}…");
    }
    trimmed.to_string()
}

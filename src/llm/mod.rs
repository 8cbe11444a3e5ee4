//! Upstream completion service.
//!
//! Two request shapes are supported, one per [`Strategy`] variant. The
//! resolver tries them in order; [`CompletionClient::send`] dispatches on the
//! variant so callers need no trait-object machinery. Whatever shape answered,
//! [`extract::extract_answer`] locates the text in the raw JSON.

pub mod extract;
pub mod providers;

pub use providers::CompletionClient;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

/// Failure of a single upstream attempt. The `Display` form is what callers
/// see as `lastError`.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("{strategy} request failed: {message}")]
    Transport { strategy: &'static str, message: String },
    #[error("{strategy} returned HTTP {status}: {message}")]
    Status {
        strategy: &'static str,
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("{strategy} response body is not valid JSON: {message}")]
    Decode { strategy: &'static str, message: String },
    #[error("{0} response contained no answer text")]
    NoText(&'static str),
}

// ── Strategy ──────────────────────────────────────────────────────────────────

/// One way of asking the upstream service for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// `/v1/chat/completions` with a role-tagged message list.
    ChatCompletions,
    /// `/v1/responses` with role-tagged input items, optionally grounded with
    /// a `file_search` tool bound to a knowledge store.
    Responses { vector_store_id: Option<String> },
}

impl Strategy {
    /// Short label used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::ChatCompletions => "chat_completions",
            Strategy::Responses { .. } => "responses",
        }
    }
}

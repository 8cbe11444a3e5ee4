//! Answer resolver: turns one visitor question into one bounded answer.
//!
//! The resolver walks a fixed plan of upstream [`Strategy`] values in order,
//! stopping at the first attempt whose response yields answer text:
//!
//! ```text
//! 1. chat_completions                     always
//! 2. responses + file_search(store id)    only when a knowledge store is configured
//! ```
//!
//! Attempts are strictly sequential; a failed or empty attempt is recorded and
//! the next one runs. When the plan is exhausted the last recorded error is
//! returned inside [`ResolveError::Upstream`]. Nothing is retried beyond the
//! plan and nothing is kept between calls.

mod normalize;
mod question;

pub use normalize::{ELLIPSIS, MAX_ANSWER_CHARS, normalize_answer};
pub use question::{MIN_QUESTION_CHARS, Question};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::llm::{CompletionClient, ProviderError, Strategy, extract};
use crate::prompt;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Missing, non-string or too-short question. No upstream call was made.
    #[error("invalid question")]
    InvalidInput,
    /// Every planned attempt failed or returned no text.
    #[error("upstream returned no text: {last_error}")]
    Upstream { last_error: String },
    /// Anything unexpected inside request handling.
    #[error("internal error: {0}")]
    Internal(String),
}

// ── Answer ────────────────────────────────────────────────────────────────────

/// Final answer: a single normalized paragraph of at most
/// [`MAX_ANSWER_CHARS`] characters plus an optional [`ELLIPSIS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(String);

impl Answer {
    pub fn from_raw(raw: &str) -> Self {
        Self(normalize_answer(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Stateless resolver. Cheap to clone; share one per process.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: CompletionClient,
    vector_store_id: Option<String>,
}

impl Resolver {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        Ok(Self {
            client: CompletionClient::new(config)?,
            vector_store_id: config.vector_store_id.clone(),
        })
    }

    /// Ordered upstream attempts. Never empty; at most two entries.
    pub fn plan(&self) -> Vec<Strategy> {
        let mut plan = vec![Strategy::ChatCompletions];
        if let Some(id) = &self.vector_store_id {
            plan.push(Strategy::Responses { vector_store_id: Some(id.clone()) });
        }
        plan
    }

    /// Validate `raw` and resolve it. Invalid input fails before any
    /// network activity.
    pub async fn resolve(&self, raw: &str) -> Result<Answer, ResolveError> {
        let question = Question::parse(raw)?;
        self.answer(&question).await
    }

    /// Run the plan for an already validated question.
    pub async fn answer(&self, question: &Question) -> Result<Answer, ResolveError> {
        let system = prompt::system_prompt();
        let mut last_error: Option<ProviderError> = None;

        for strategy in self.plan() {
            let name = strategy.name();
            debug!(strategy = name, question_len = question.as_str().len(), "upstream attempt");

            match self.client.send(&strategy, system, question.as_str()).await {
                Ok(data) => match extract::extract_answer(&data) {
                    Some(text) => {
                        let answer = Answer::from_raw(text);
                        info!(strategy = name, answer_len = answer.as_str().len(), "answer resolved");
                        return Ok(answer);
                    }
                    None => {
                        warn!(strategy = name, "upstream response contained no answer text");
                        last_error = Some(ProviderError::NoText(name));
                    }
                },
                Err(e) => {
                    warn!(strategy = name, error = %e, "upstream attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(ResolveError::Upstream {
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

//! Axum handlers for `/api/*` routes and the mapping of [`ResolveError`]
//! onto HTTP responses.
//!
//! Error bodies never carry more than a short diagnostic; the widget shows
//! its own generic apology for any non-200.

use std::any::Any;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{error, warn};

use crate::resolver::{Question, ResolveError};

use super::AppState;

const UPSTREAM_HINT: &str = "Check API key / model / DEBUG_OPENAI logs in server console";

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ResolveError::InvalidInput => (StatusCode::BAD_REQUEST, json!({ "error": "Invalid question" })),
            ResolveError::Upstream { last_error } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Upstream returned no text",
                    "hint": UPSTREAM_HINT,
                    "lastError": last_error,
                }),
            ),
            ResolveError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Server error", "detail": detail }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// POST /api/chat
///
/// The body is read raw so that malformed JSON is reported as an invalid
/// question rather than axum's own rejection.
pub(super) async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let result = match Question::from_json(&payload) {
        Ok(question) => state.resolver.answer(&question).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(answer) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, "no-store")],
            Json(json!({ "answer": answer.into_string() })),
        )
            .into_response(),
        Err(e) => {
            if let ResolveError::Upstream { last_error } = &e {
                warn!(%last_error, "chat request exhausted upstream attempts");
            }
            e.into_response()
        }
    }
}

/// Any non-POST method on `/api/chat`.
pub(super) async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, Json(json!({ "error": "Method not allowed" }))).into_response()
}

/// Unknown paths when no static site is served.
pub(super) async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

/// `CatchPanicLayer` hook: a panicking handler becomes a 500 JSON body.
pub(super) fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!(%detail, "request handler panicked");
    ResolveError::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_input_maps_to_400() {
        let resp = ResolveError::InvalidInput.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await, json!({ "error": "Invalid question" }));
    }

    #[tokio::test]
    async fn upstream_maps_to_502_with_last_error() {
        let resp = ResolveError::Upstream { last_error: "chat_completions request failed: refused".into() }
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Upstream returned no text");
        assert_eq!(body["hint"], UPSTREAM_HINT);
        assert_eq!(body["lastError"], "chat_completions request failed: refused");
    }

    #[tokio::test]
    async fn panic_payloads_map_to_500() {
        let resp = panic_response(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await, json!({ "error": "Server error", "detail": "boom" }));

        let resp = panic_response(Box::new(String::from("index out of range")));
        assert_eq!(body_json(resp).await["detail"], "index out of range");

        let resp = panic_response(Box::new(7_u8));
        assert_eq!(body_json(resp).await["detail"], "handler panicked");
    }
}

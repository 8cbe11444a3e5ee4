//! Axum HTTP server: `POST /api/chat` plus optional static site files.
//!
//! ## URL layout
//!
//! ```text
//! POST /api/chat          → answer a question
//! *    /api/chat          → 405
//! GET  /*path             → static_dir, `<path>.html` fallback (feature `static-site`), else 404
//! ```
//!
//! `run()` drives the axum event loop; the shared [`CancellationToken`] is
//! wired to axum's graceful shutdown.

mod api;
#[cfg(feature = "static-site")]
mod site;

use axum::{Router, routing::post};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;
#[cfg(not(feature = "static-site"))]
use tracing::warn;

use crate::config::Config;
use crate::error::AppError;
use crate::resolver::Resolver;

// ── Shared request state ──────────────────────────────────────────────────────

/// Axum router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone: the resolver only holds reference-counted handles and
/// read-only config.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
}

impl AppState {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the full router for `config`: API routes, static fallback and the
/// panic-to-500 layer.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/api/chat", post(api::chat).fallback(api::method_not_allowed))
        .with_state(state);

    let router = with_static_fallback(router, config);

    router.layer(CatchPanicLayer::custom(api::panic_response))
}

#[cfg(feature = "static-site")]
fn with_static_fallback(router: Router, config: &Config) -> Router {
    match config.server.static_dir.as_deref() {
        Some(dir) => site::attach(router, dir),
        None => router.fallback(api::not_found),
    }
}

#[cfg(not(feature = "static-site"))]
fn with_static_fallback(router: Router, config: &Config) -> Router {
    if let Some(dir) = &config.server.static_dir {
        warn!(static_dir = %dir.display(), "static_dir set but the static-site feature is disabled");
    }
    router.fallback(api::not_found)
}

// ── Server loop ───────────────────────────────────────────────────────────────

/// Bind the TCP listener for `config.bind_addr()`.
pub async fn bind(config: &Config) -> Result<TcpListener, AppError> {
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;
    info!(%bind_addr, "listening");
    Ok(listener)
}

/// Serve `router` on `listener` until `shutdown` is cancelled.
pub async fn run(listener: TcpListener, router: Router, shutdown: CancellationToken) -> Result<(), AppError> {
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

    info!("server shut down");
    Ok(())
}

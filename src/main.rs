//! advisor-chat server entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Load config (file + env overrides)
//!   3. Init logger once at the configured level
//!   4. Build the resolver
//!   5. Spawn Ctrl-C / SIGTERM → shutdown signal watcher
//!   6. Serve until shutdown

use advisor_chat::{config, error::AppError, logger, resolver::Resolver, server};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present; the file is optional.
    let _ = dotenvy::dotenv();

    let config = config::load()?;

    logger::init(&config.server.log_level)?;

    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; export it before starting or every upstream call will fail");
    }

    info!(
        bind_addr = %config.bind_addr(),
        model = %config.upstream.model,
        fallback = config.vector_store_id.is_some(),
        debug = config.debug,
        "config loaded"
    );

    let resolver = Resolver::new(&config).map_err(|e| AppError::Config(e.to_string()))?;

    // Shared shutdown token: the signal watcher cancels it, the server watches it.
    let shutdown = CancellationToken::new();
    tokio::spawn(watch_signals(shutdown.clone()));

    let listener = server::bind(&config).await?;
    let router = server::build_router(server::AppState::new(resolver), &config);
    server::run(listener, router, shutdown).await
}

async fn watch_signals(shutdown: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("ctrl-c received, initiating shutdown"),
                    _ = term.recv() => info!("SIGTERM received, initiating shutdown"),
                }
            }
            Err(e) => {
                warn!(error = %e, "cannot install SIGTERM handler; only ctrl-c will stop the server");
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("ctrl-c received, initiating shutdown");
                }
            }
        }
    }
    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, initiating shutdown");
        }
    }
    shutdown.cancel();
}

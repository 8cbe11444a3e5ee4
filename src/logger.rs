//! Logging initialisation via tracing-subscriber.
//!
//! `RUST_LOG`, when set to a valid filter, wins over the configured level so
//! operators can turn on per-module tracing without touching the config
//! file. Otherwise `[server] log_level` / `ADVISOR_LOG_LEVEL` applies.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Install the global tracing subscriber, writing to stderr.
///
/// `level` is a plain level name (`"error"` .. `"trace"`, or `"off"`);
/// filter directives belong in `RUST_LOG`.
pub fn init(level: &str) -> Result<(), AppError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| AppError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

/// Choose the active filter: a non-blank, parseable `rust_log` first, then
/// the configured `level`.
fn build_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter, AppError> {
    if let Some(filter) = rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
    {
        return Ok(filter);
    }
    let level = parse_level(level)?;
    EnvFilter::try_new(level.to_string())
        .map_err(|e| AppError::Logger(format!("invalid log level '{level}': {e}")))
}

/// Parse a plain log level name, rejecting empty strings, typos and
/// directive lists.
pub fn parse_level(level: &str) -> Result<LevelFilter, AppError> {
    if level.is_empty() {
        return Err(AppError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| AppError::Logger(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_levels_parse() {
        for l in &["error", "warn", "info", "debug", "trace", "off"] {
            assert!(parse_level(l).is_ok(), "expected '{l}' to be valid");
        }
    }

    #[test]
    fn typos_and_directives_are_rejected() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
        assert!(parse_level("info,advisor_chat=debug").is_err());
    }

    #[test]
    fn configured_level_used_without_rust_log() {
        let filter = build_filter("warn", None).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn blank_rust_log_is_ignored() {
        let filter = build_filter("error", Some("  ")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn rust_log_wins_over_configured_level() {
        let filter = build_filter("warn", Some("info,advisor_chat=trace")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn bad_configured_level_errors_without_rust_log() {
        let msg = build_filter("loud", None).unwrap_err().to_string();
        assert!(msg.contains("unrecognised log level"));
    }

    #[test]
    fn init_succeeds_or_already_init() {
        // Another test in the same process may have installed a subscriber first.
        match init("info") {
            Ok(()) => {}
            Err(AppError::Logger(msg)) if msg.contains("set subscriber") => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}

//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the file named by `ADVISOR_CONFIG`), then applies environment
//! overrides. Secrets and the knowledge-store id only ever come from the
//! environment. The resulting [`Config`] is immutable and shared read-only
//! for the life of the process.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;
use crate::logger;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// HTTP listener configuration (`[server]`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Listen port. `PORT` overrides the TOML value.
    pub port: u16,
    pub log_level: String,
    /// Directory of static site files served on non-API paths (already
    /// expanded, no `~`). `None` disables static serving.
    pub static_dir: Option<PathBuf>,
}

/// Completion-service configuration (`[upstream]`).
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Full chat-completions endpoint URL (primary attempt).
    pub chat_completions_url: String,
    /// Full responses endpoint URL (fallback attempt).
    pub responses_url: String,
    /// Model name passed in both request shapes.
    pub model: String,
    /// Sampling temperature shared by both attempts.
    pub temperature: f32,
    /// Token budget: `max_tokens` for chat-style, `max_output_tokens` for the fallback.
    pub max_tokens: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// Fully-resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    /// Bearer credential from `OPENAI_API_KEY`. Never sourced from TOML.
    pub api_key: Option<String>,
    /// Knowledge-store id from `OPENAI_VECTOR_STORE_ID`; enables the fallback attempt.
    pub vector_store_id: Option<String>,
    /// `DEBUG_OPENAI=1`: log raw upstream payloads.
    pub debug: bool,
}

impl Config {
    /// `host:port` string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    /// Built-in defaults, identical to an empty TOML file with no env overrides.
    fn default() -> Self {
        let raw = RawConfig::default();
        Self {
            server: ServerConfig {
                host: raw.server.host,
                port: raw.server.port,
                log_level: raw.server.log_level,
                static_dir: None,
            },
            upstream: raw.upstream.into(),
            api_key: None,
            vector_store_id: None,
            debug: false,
        }
    }
}

/// Environment-sourced values, captured once so loading stays a pure function.
///
/// Empty strings are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_key: Option<String>,
    pub vector_store_id: Option<String>,
    pub debug: Option<String>,
    pub port: Option<String>,
    pub log_level: Option<String>,
}

impl EnvOverrides {
    /// Read every supported variable from the process environment.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("OPENAI_API_KEY"),
            vector_store_id: non_empty_var("OPENAI_VECTOR_STORE_ID"),
            debug: non_empty_var("DEBUG_OPENAI"),
            port: non_empty_var("PORT"),
            log_level: non_empty_var("ADVISOR_LOG_LEVEL"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ── Raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    upstream: RawUpstream,
}

#[derive(Deserialize)]
struct RawServer {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default)]
    static_dir: Option<String>,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            static_dir: None,
        }
    }
}

#[derive(Deserialize)]
struct RawUpstream {
    #[serde(default = "default_chat_completions_url")]
    chat_completions_url: String,
    #[serde(default = "default_responses_url")]
    responses_url: String,
    #[serde(default = "default_model")]
    model: String,
    #[serde(default = "default_temperature")]
    temperature: f32,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawUpstream {
    fn default() -> Self {
        Self {
            chat_completions_url: default_chat_completions_url(),
            responses_url: default_responses_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl From<RawUpstream> for UpstreamConfig {
    fn from(raw: RawUpstream) -> Self {
        Self {
            chat_completions_url: raw.chat_completions_url,
            responses_url: raw.responses_url,
            model: raw.model,
            temperature: raw.temperature,
            max_tokens: raw.max_tokens,
            timeout_seconds: raw.timeout_seconds,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_log_level() -> String { "info".to_string() }
fn default_chat_completions_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_responses_url() -> String { "https://api.openai.com/v1/responses".to_string() }
fn default_model() -> String { "gpt-4o-mini".to_string() }
fn default_temperature() -> f32 { 0.4 }
fn default_max_tokens() -> u32 { 220 }
fn default_timeout_seconds() -> u64 { 30 }

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config from `ADVISOR_CONFIG` or `config/default.toml`, then apply
/// env-var overrides.
///
/// An explicitly named file must exist. When no path is given and the
/// default file is absent, built-in defaults are used.
pub fn load() -> Result<Config, AppError> {
    let env = EnvOverrides::from_env();
    match non_empty_var("ADVISOR_CONFIG") {
        Some(path) => load_from(Some(Path::new(&path)), &env),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            let path = default_path.exists().then_some(default_path);
            load_from(path, &env)
        }
    }
}

/// Internal loader. Accepts an explicit path and captured overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: Option<&Path>, env: &EnvOverrides) -> Result<Config, AppError> {
    let parsed = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            toml::from_str::<RawConfig>(&raw)
                .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?
        }
        None => RawConfig::default(),
    };

    let port = match non_empty(&env.port) {
        Some(p) => p
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("invalid PORT '{p}': {e}")))?,
        None => parsed.server.port,
    };

    let log_level = non_empty(&env.log_level)
        .map(str::to_string)
        .unwrap_or(parsed.server.log_level);
    logger::parse_level(&log_level).map_err(|e| AppError::Config(e.to_string()))?;

    let upstream = UpstreamConfig::from(parsed.upstream);
    if !(0.0..=2.0).contains(&upstream.temperature) {
        return Err(AppError::Config(format!(
            "upstream.temperature must be within 0.0..=2.0, got {}",
            upstream.temperature
        )));
    }

    Ok(Config {
        server: ServerConfig {
            host: parsed.server.host,
            port,
            log_level,
            static_dir: parsed.server.static_dir.as_deref().map(expand_home),
        },
        upstream,
        api_key: non_empty(&env.api_key).map(str::to_string),
        vector_store_id: non_empty(&env.vector_store_id).map(str::to_string),
        debug: non_empty(&env.debug) == Some("1"),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

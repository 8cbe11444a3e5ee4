//! advisor-chat: backend for a consulting-site chat widget.
//!
//! A visitor question arrives on `POST /api/chat`; the [`resolver`] asks an
//! upstream completion service (chat-completions first, a knowledge-store
//! grounded responses call as fallback) and returns one normalized paragraph.

pub mod config;
pub mod error;
pub mod llm;
pub mod logger;
pub mod prompt;
pub mod resolver;
pub mod server;

//! The assistant's system prompt.
//!
//! Compiled in from `config/prompts/system.txt`; it is process-wide and never
//! varies per request.

const SYSTEM_PROMPT_RAW: &str = include_str!("../config/prompts/system.txt");

/// The fixed system prompt sent with every upstream request.
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT_RAW.trim()
}

//! Inbound question validation.

use serde_json::Value;

use super::ResolveError;

/// Shortest accepted question, in characters after trimming.
pub const MIN_QUESTION_CHARS: usize = 3;

/// A validated visitor question: trimmed and at least
/// [`MIN_QUESTION_CHARS`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_QUESTION_CHARS {
            return Err(ResolveError::InvalidInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Pull `question` out of a request body. Missing fields, non-string
    /// values and non-object bodies are all invalid input.
    pub fn from_json(body: &Value) -> Result<Self, ResolveError> {
        body.get("question")
            .and_then(Value::as_str)
            .ok_or(ResolveError::InvalidInput)
            .and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trims_surrounding_whitespace() {
        let q = Question::parse("  What is ISO 45001?\n").unwrap();
        assert_eq!(q.as_str(), "What is ISO 45001?");
    }

    #[test]
    fn rejects_short_questions() {
        for raw in ["", "hi", "  ab  ", "\n\t"] {
            assert!(
                matches!(Question::parse(raw), Err(ResolveError::InvalidInput)),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn three_characters_is_enough() {
        assert!(Question::parse("KPI").is_ok());
        // Counted in characters, not bytes.
        assert!(Question::parse("¿é?").is_ok());
    }

    #[test]
    fn from_json_requires_string_field() {
        assert!(Question::from_json(&json!({"question": "What is ATEX?"})).is_ok());
        assert!(Question::from_json(&json!({"question": 42})).is_err());
        assert!(Question::from_json(&json!({"question": null})).is_err());
        assert!(Question::from_json(&json!({})).is_err());
        assert!(Question::from_json(&json!("What is ATEX?")).is_err());
        assert!(Question::from_json(&Value::Null).is_err());
    }
}

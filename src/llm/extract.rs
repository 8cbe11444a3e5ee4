//! Answer-text extraction from raw upstream JSON.
//!
//! The two API shapes put the answer at different paths, and either server
//! may proxy to the other, so every response is searched with the same
//! ordered list. The first path holding a non-blank string wins.

use serde_json::Value;

/// JSON pointers tried in priority order.
pub const ANSWER_POINTERS: &[&str] = &[
    "/choices/0/message/content",
    "/output_text",
    "/output/0/content/0/text",
    "/response/output_text",
];

/// Return the answer text from an upstream response, if any.
///
/// Falls back to the first `message` item of an `output` array when none of
/// [`ANSWER_POINTERS`] match: with `file_search` attached, `output[0]` is the
/// tool call and the message comes later.
pub fn extract_answer(data: &Value) -> Option<&str> {
    ANSWER_POINTERS
        .iter()
        .find_map(|pointer| non_blank(data.pointer(pointer)))
        .or_else(|| first_output_message(data))
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn first_output_message(data: &Value) -> Option<&str> {
    data.get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .find_map(|part| non_blank(part.get("text")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_completions_shape() {
        let data = json!({"choices": [{"message": {"content": "ISO 45001 is ..."}}]});
        assert_eq!(extract_answer(&data), Some("ISO 45001 is ..."));
    }

    #[test]
    fn responses_output_text() {
        let data = json!({"output_text": "ATEX covers ..."});
        assert_eq!(extract_answer(&data), Some("ATEX covers ..."));
    }

    #[test]
    fn responses_nested_output() {
        let data = json!({"output": [{"content": [{"type": "output_text", "text": "Seveso III ..."}]}]});
        assert_eq!(extract_answer(&data), Some("Seveso III ..."));
    }

    #[test]
    fn wrapped_response_output_text() {
        let data = json!({"response": {"output_text": "Lean TPM ..."}});
        assert_eq!(extract_answer(&data), Some("Lean TPM ..."));
    }

    #[test]
    fn message_after_file_search_call() {
        let data = json!({
            "output": [
                {"type": "file_search_call", "id": "fs_1", "status": "completed"},
                {"type": "message", "content": [{"type": "output_text", "text": "Grounded answer"}]}
            ]
        });
        assert_eq!(extract_answer(&data), Some("Grounded answer"));
    }

    #[test]
    fn earlier_pointer_wins() {
        let data = json!({
            "choices": [{"message": {"content": "from chat"}}],
            "output_text": "from responses"
        });
        assert_eq!(extract_answer(&data), Some("from chat"));
    }

    #[test]
    fn blank_or_null_values_are_skipped() {
        let data = json!({
            "choices": [{"message": {"content": null}}],
            "output_text": "   ",
            "response": {"output_text": "fallback"}
        });
        assert_eq!(extract_answer(&data), Some("fallback"));
    }

    #[test]
    fn non_string_values_are_ignored() {
        let data = json!({"output_text": ["not", "a", "string"]});
        assert_eq!(extract_answer(&data), None);
    }

    #[test]
    fn error_payload_has_no_answer() {
        let data = json!({"error": {"message": "Incorrect API key provided"}});
        assert_eq!(extract_answer(&data), None);
        assert_eq!(extract_answer(&json!({})), None);
        assert_eq!(extract_answer(&Value::Null), None);
    }
}

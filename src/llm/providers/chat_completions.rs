//! Chat-completions request shape (`/v1/chat/completions`).

use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<Message<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(model: &'a str, system: &'a str, question: &'a str, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model,
            messages: vec![
                Message { role: "system", content: system },
                Message { role: "user", content: question },
            ],
            temperature,
            max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_system_then_user() {
        let req = ChatCompletionRequest::new("gpt-4o-mini", "be brief", "What is ATEX?", 0.5, 220);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "What is ATEX?"}
                ],
                "temperature": 0.5,
                "max_tokens": 220
            })
        );
    }
}

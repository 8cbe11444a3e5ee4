//! Responses request shape (`/v1/responses`), optionally grounded with
//! `file_search` over a knowledge store.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct InputItem<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileSearchTool<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub vector_store_ids: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponsesRequest<'a> {
    pub model: &'a str,
    pub input: Vec<InputItem<'a>>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<FileSearchTool<'a>>,
}

impl<'a> ResponsesRequest<'a> {
    pub fn new(
        model: &'a str,
        system: &'a str,
        question: &'a str,
        temperature: f32,
        max_output_tokens: u32,
        vector_store_id: Option<&'a str>,
    ) -> Self {
        let tools = vector_store_id
            .map(|id| FileSearchTool { kind: "file_search", vector_store_ids: vec![id] })
            .into_iter()
            .collect();
        Self {
            model,
            input: vec![
                InputItem { role: "system", content: system },
                InputItem { role: "user", content: question },
            ],
            temperature,
            max_output_tokens,
            tools,
        }
    }
}

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::MonitorError;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-5-sonnet-latest";
const MAX_TOKENS: u32 = 600;

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

pub struct ClaudeSummarizer {
    client: Client,
}

impl ClaudeSummarizer {
    pub fn new() -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }

    /// Send the rendered prompt to Claude and collect the text blocks of
    /// the reply. One shot, no retries.
    pub async fn summarize(&self, api_key: &str, prompt: &str) -> Result<String, MonitorError> {
        let request = ClaudeRequest {
            model: MODEL.to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(MonitorError::Api { status, body });
        }

        let payload: Value = response.json().await?;
        extract_text(&payload)
    }
}

/// Concatenate the `text` blocks of a Claude messages response, newline
/// separated and trimmed. The `content` field must be a list.
pub fn extract_text(payload: &Value) -> Result<String, MonitorError> {
    let blocks = payload
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| MonitorError::Format("Unexpected Claude response format".to_string()))?;

    let parts: Vec<&str> = blocks
        .iter()
        .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
        .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
        .filter(|text| !text.is_empty())
        .collect();

    Ok(parts.join("\n").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_text_joins_text_blocks() {
        let payload = json!({
            "content": [
                {"type": "text", "text": "First part."},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "Second part."}
            ]
        });
        assert_eq!(extract_text(&payload).unwrap(), "First part.\nSecond part.");
    }

    #[test]
    fn test_extract_text_trims_whitespace() {
        let payload = json!({"content": [{"type": "text", "text": "  padded  \n"}]});
        assert_eq!(extract_text(&payload).unwrap(), "padded");
    }

    #[test]
    fn test_missing_content_list_is_a_format_error() {
        let payload = json!({"content": "not-a-list"});
        assert!(matches!(
            extract_text(&payload).unwrap_err(),
            MonitorError::Format(_)
        ));

        let payload = json!({"id": "msg_123"});
        assert!(matches!(
            extract_text(&payload).unwrap_err(),
            MonitorError::Format(_)
        ));
    }

    #[test]
    fn test_empty_text_blocks_are_dropped() {
        let payload = json!({
            "content": [
                {"type": "text", "text": ""},
                {"type": "text", "text": "Only this."}
            ]
        });
        assert_eq!(extract_text(&payload).unwrap(), "Only this.");
    }
}

//! Wire types for OpenAI-compatible chat completion endpoints.
//!
//! Only request construction and response reading live here; sending the
//! request is the shell's job.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::deck::PromptPair;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("completion response has no choices")]
    NoChoices,

    #[error("completion response has no text content")]
    EmptyContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a `POST /chat/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modalities: Vec<String>,
}

/// Build a system + user text completion request.
pub fn chat_request(
    model: &str,
    prompt: &PromptPair,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(prompt.system.clone()),
            ChatMessage::user(prompt.user.clone()),
        ],
        temperature,
        max_tokens,
        modalities: Vec::new(),
    }
}

/// Build a single-message request asking an image-capable model for an
/// image alongside its text.
pub fn image_request(model: &str, prompt: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(prompt)],
        temperature: None,
        max_tokens: None,
        modalities: vec!["image".to_string(), "text".to_string()],
    }
}

/// Read the first choice's message text from a completion response.
///
/// Accepts both plain string content and the content-parts form
/// (`[{"type": "text", "text": "..."}]`), whose text parts are concatenated.
pub fn completion_text(body: &Value) -> Result<String, CompletionError> {
    let choice = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or(CompletionError::NoChoices)?;

    let text = match choice.pointer("/message/content") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(""),
        _ => String::new(),
    };

    if text.trim().is_empty() {
        return Err(CompletionError::EmptyContent);
    }

    Ok(text)
}

/// Read the first generated image (`choices[0].message.images[0].image_url.url`).
pub fn extract_image_url(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/images/0/image_url/url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prompt() -> PromptPair {
        PromptPair {
            system: "sys".to_string(),
            user: "usr".to_string(),
        }
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = chat_request("google/gemini-2.5-flash", &prompt(), Some(0.5), Some(2048));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "google/gemini-2.5-flash",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ],
                "temperature": 0.5,
                "max_tokens": 2048
            })
        );
    }

    #[test]
    fn test_chat_request_omits_unset_config() {
        let request = chat_request("m", &prompt(), None, None);
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("temperature").is_none());
        assert!(value.get("max_tokens").is_none());
        assert!(value.get("modalities").is_none());
    }

    #[test]
    fn test_image_request_serialization() {
        let request = image_request("image-model", "draw a leaf");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "image-model",
                "messages": [{"role": "user", "content": "draw a leaf"}],
                "modalities": ["image", "text"]
            })
        );
    }

    #[test]
    fn test_completion_text_string_content() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "hello"}}]});
        assert_eq!(completion_text(&body).unwrap(), "hello");
    }

    #[test]
    fn test_completion_text_content_parts() {
        let body = json!({"choices": [{"message": {"content": [
            {"type": "text", "text": "{\"a\":"},
            {"type": "text", "text": "1}"}
        ]}}]});
        assert_eq!(completion_text(&body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_completion_text_errors() {
        assert_eq!(
            completion_text(&json!({"choices": []})),
            Err(CompletionError::NoChoices)
        );
        assert_eq!(
            completion_text(&json!({"error": "x"})),
            Err(CompletionError::NoChoices)
        );
        assert_eq!(
            completion_text(&json!({"choices": [{"message": {"content": null}}]})),
            Err(CompletionError::EmptyContent)
        );
    }

    #[test]
    fn test_extract_image_url() {
        let body = json!({"choices": [{"message": {
            "content": "Here is your image",
            "images": [{"type": "image_url", "image_url": {"url": "data:image/png;base64,AAAA"}}]
        }}]});
        assert_eq!(
            extract_image_url(&body).as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn test_extract_image_url_missing() {
        let body = json!({"choices": [{"message": {"content": "I can only describe it."}}]});
        assert_eq!(extract_image_url(&body), None);
        assert_eq!(extract_image_url(&json!({})), None);
    }
}

use crate::config::ModelConfig;
use crate::prelude::Error;
use deckgen_core::completion::{chat_request, completion_text, image_request, ChatRequest};
use deckgen_core::deck::PromptPair;
use serde_json::Value;

/// Sends prompts to the chat completion endpoint, one request at a time.
///
/// There is no retry and no timeout beyond the HTTP client's defaults: a
/// failed call fails the operation that issued it.
#[derive(Debug, Clone)]
pub struct ModelInvoker {
    client: reqwest::Client,
    config: ModelConfig,
}

impl ModelInvoker {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Run a text completion and return the first choice's message text.
    pub async fn complete(&self, prompt: &PromptPair) -> Result<String, Error> {
        let request = chat_request(
            &self.config.model,
            prompt,
            Some(self.config.temperature),
            self.config.max_tokens,
        );

        let body = self.send(&request).await?;

        Ok(completion_text(&body)?)
    }

    /// Ask the image model for an illustration and return the raw response
    /// body; locating the image inside it is up to the caller.
    pub async fn generate_image(&self, prompt: &str) -> Result<Value, Error> {
        let request = image_request(&self.config.image_model, prompt);
        self.send(&request).await
    }

    async fn send(&self, request: &ChatRequest) -> Result<Value, Error> {
        // Checked before touching the network.
        let api_key = self.config.require_api_key()?;

        log::debug!(
            "POST {} model={} messages={}",
            self.config.completions_url(),
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            log::error!("Model API error: {} {}", status.as_u16(), body);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Network(format!("Failed to read model response: {e}")))
    }
}

use crate::prelude::Error;

pub const API_KEY_ENV: &str = "DECKGEN_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "google/gemini-2.5-flash-image-preview";

/// Chat completion endpoint settings, read once at startup and passed to
/// every invocation.
#[derive(Debug, Clone, clap::Args)]
pub struct ModelConfig {
    /// API key for the chat completion endpoint
    #[clap(long, env = "DECKGEN_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API (without /chat/completions)
    #[clap(long, env = "DECKGEN_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model used for slide text
    #[clap(long, env = "DECKGEN_MODEL", global = true, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Model used for slide illustrations
    #[clap(long, env = "DECKGEN_IMAGE_MODEL", global = true, default_value = DEFAULT_IMAGE_MODEL)]
    pub image_model: String,

    /// Sampling temperature for slide text
    #[clap(long, env = "DECKGEN_TEMPERATURE", global = true, default_value = "0.7")]
    pub temperature: f32,

    /// Upper bound on generated tokens for slide text
    #[clap(long, env = "DECKGEN_MAX_TOKENS", global = true)]
    pub max_tokens: Option<u32>,
}

impl ModelConfig {
    /// Configuration with default models pointing at `base_url`.
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: None,
        }
    }

    /// The API key, or a configuration error when it is unset or blank.
    pub fn require_api_key(&self) -> Result<&str, Error> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(Error::Configuration(API_KEY_ENV))
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

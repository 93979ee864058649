use deckgen_core::completion::CompletionError;
use deckgen_core::deck::{ExtractError, ValidationError};

/// The user-facing operation an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GenerateDeck,
    RegenerateSlide,
    GenerateImage,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GenerateDeck => "generate-ppt-content",
            Self::RegenerateSlide => "regenerate-slide",
            Self::GenerateImage => "generate-slide-image",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} is not configured")]
    Configuration(&'static str),

    #[error("Model API returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty model response: {0}")]
    EmptyCompletion(#[from] CompletionError),

    #[error("Could not extract JSON: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Unexpected response shape: {0}")]
    Validation(#[from] ValidationError),

    #[error("No image generated")]
    NoImage,

    #[error("{0}")]
    InvalidRequest(String),
}

impl Error {
    /// Message shown to end users. Parse-related failures all collapse into
    /// one message; the detail stays in the logs.
    pub fn client_message(&self, operation: Operation) -> String {
        match self {
            Self::Configuration(_) | Self::NoImage | Self::InvalidRequest(_) => self.to_string(),
            Self::EmptyCompletion(_) | Self::Extraction(_) | Self::Validation(_) => {
                "Failed to parse AI response".to_string()
            }
            Self::Upstream { status, .. } => match operation {
                Operation::GenerateDeck => "Failed to generate content".to_string(),
                Operation::RegenerateSlide => "Failed to regenerate slide".to_string(),
                Operation::GenerateImage => format!("Image generation failed: {status}"),
            },
            Self::Network(_) => match operation {
                Operation::GenerateDeck => "Failed to generate content".to_string(),
                Operation::RegenerateSlide => "Failed to regenerate slide".to_string(),
                Operation::GenerateImage => "Image generation failed".to_string(),
            },
        }
    }

    /// HTTP status used when the error crosses the server boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            _ => 500,
        }
    }
}

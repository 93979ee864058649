pub mod extract;
pub mod outline;
pub mod prompt;
pub mod types;
pub mod validate;

pub use extract::{extract_json, ExtractError};
pub use outline::render_outline;
pub use prompt::{
    audience_instruction, build_deck_prompt, build_image_prompt, build_slide_edit_prompt,
    PromptPair,
};
pub use types::{
    AudienceType, Deck, GenerationMode, GenerationRequest, SampleStats, Slide, SlideEditRequest,
    SlideImageRequest,
};
pub use validate::{conformance_warnings, validate_deck, validate_slide, ValidationError};

use super::types::{AudienceType, GenerationMode, GenerationRequest, SlideEditRequest, SlideImageRequest};

/// A system instruction and a user instruction, ready to be sent as a
/// two-message chat completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

const DECK_JSON_SHAPE: &str = r#"{
  "title": "Presentation Title",
  "slides": [
    {"title": "Slide Title", "bullets": ["Point 1", "Point 2", "Point 3"]}
  ]
}"#;

const SLIDE_JSON_SHAPE: &str = r#"{
  "title": "New Slide Title",
  "bullets": ["Point 1", "Point 2", "Point 3", "Point 4"]
}"#;

/// Writing guidance for each audience.
pub fn audience_instruction(audience: AudienceType) -> &'static str {
    match audience {
        AudienceType::Student => {
            "Use simple language, focus on key concepts and definitions that would appear in exams."
        }
        AudienceType::Teacher => {
            "Include comprehensive details, teaching points, and discussion topics."
        }
        AudienceType::Professional => {
            "Use industry terminology, focus on practical applications and insights."
        }
        AudienceType::General => "Keep content accessible and engaging for a broad audience.",
    }
}

/// Build the prompt that asks the model for a complete deck.
///
/// In sample mode the system instruction also asks the model to match the
/// sample's structure, but only when statistics were provided.
pub fn build_deck_prompt(request: &GenerationRequest) -> PromptPair {
    let mut system = format!(
        "You are an expert presentation creator. Generate a structured PowerPoint presentation.

Rules:
- Each slide should have a clear title and 3-5 bullet points
- Keep bullet points concise (under 15 words each)
- Focus on key information that's easy to remember
- Structure: Title slide info, then content slides, ending with a conclusion
- {}",
        audience_instruction(request.audience_type)
    );

    if let (GenerationMode::Sample, Some(stats)) = (request.mode, &request.sample_stats) {
        system.push_str(&format!(
            "\n\nMatch this structure from the sample:
- {} slides
- {} bullets per slide
- Bullet length around {} words",
            stats.slide_count, stats.average_bullets_per_slide, stats.average_bullet_length
        ));
    }

    let user = format!(
        "Create a {}-slide presentation about: \"{}\"\n\nReturn ONLY valid JSON in this exact format:\n{}",
        request.slide_count, request.topic, DECK_JSON_SHAPE
    );

    PromptPair { system, user }
}

/// Build the prompt that asks the model to rewrite one slide.
pub fn build_slide_edit_prompt(request: &SlideEditRequest) -> PromptPair {
    let system = format!(
        "You are an expert presentation creator. You need to regenerate a single slide based on user feedback.

Rules:
- Keep the slide title relevant to the content
- Generate 3-5 bullet points
- Keep bullet points concise (under 15 words each)
- {}
- Apply the user's requested changes while keeping the content relevant to the overall topic",
        audience_instruction(request.audience_type)
    );

    let bullets = request
        .current_slide
        .bullets
        .iter()
        .enumerate()
        .map(|(i, bullet)| format!("{}. {}", i + 1, bullet))
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "The presentation is about: \"{}\"

Current slide content:
Title: {}
Bullets:
{}

User's requested changes: \"{}\"

Return ONLY valid JSON in this exact format:
{}",
        request.topic, request.current_slide.title, bullets, request.edit_prompt, SLIDE_JSON_SHAPE
    );

    PromptPair { system, user }
}

/// Build the descriptive prompt sent to the image model for one slide.
///
/// Falls back to the slide title when the topic or the bullets are empty.
pub fn build_image_prompt(request: &SlideImageRequest) -> String {
    let title = request.slide_title.as_str();

    let topic = request
        .presentation_topic
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(title);

    let key_points = request
        .slide_bullets
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let key_points = if key_points.is_empty() {
        title
    } else {
        key_points.as_str()
    };

    format!(
        "Educational illustration for a presentation slide about \"{title}\". Topic: {topic}. Key points: {key_points}. Style: clean, professional, minimalist, suitable for educational PowerPoint presentation. No text in image. High quality, 16:9 aspect ratio."
    )
}

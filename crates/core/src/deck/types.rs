use serde::{Deserialize, Deserializer, Serialize};

/// Who the deck is written for.
///
/// Parsing never fails: anything that is not one of the known audiences
/// falls back to [`AudienceType::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceType {
    Student,
    Teacher,
    Professional,
    #[default]
    General,
}

impl AudienceType {
    /// Map a free-form audience name onto a known audience.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Self::Student,
            "teacher" => Self::Teacher,
            "professional" => Self::Professional,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Professional => "professional",
            Self::General => "general",
        }
    }
}

impl<'de> Deserialize<'de> for AudienceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// How the deck structure is chosen: free-form from a topic, or matched
/// against statistics taken from a sample deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Topic,
    Sample,
}

impl GenerationMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sample" => Self::Sample,
            _ => Self::Topic,
        }
    }
}

impl<'de> Deserialize<'de> for GenerationMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Structure statistics measured on a sample deck.
///
/// Values are interpolated into the prompt as-is; nothing checks that they
/// are sensible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SampleStats {
    pub slide_count: i64,
    pub average_bullets_per_slide: f64,
    pub average_bullet_length: f64,
}

fn default_slide_count() -> u32 {
    5
}

/// Parameters for generating a whole deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(default = "default_slide_count")]
    pub slide_count: u32,
    #[serde(default)]
    pub audience_type: AudienceType,
    #[serde(default)]
    pub mode: GenerationMode,
    #[serde(
        default,
        rename = "sampleAnalysis",
        skip_serializing_if = "Option::is_none"
    )]
    pub sample_stats: Option<SampleStats>,
}

/// Parameters for rewriting a single slide from an edit instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideEditRequest {
    pub current_slide: Slide,
    pub edit_prompt: String,
    #[serde(default, rename = "presentationTopic")]
    pub topic: String,
    #[serde(default)]
    pub audience_type: AudienceType,
}

/// Parameters for illustrating a single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideImageRequest {
    #[serde(default)]
    pub slide_title: String,
    #[serde(default)]
    pub slide_bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_topic: Option<String>,
}

impl SlideImageRequest {
    pub fn for_slide(slide: &Slide, topic: &str) -> Self {
        Self {
            slide_title: slide.title.clone(),
            slide_bullets: slide.bullets.clone(),
            presentation_topic: Some(topic.to_string()),
        }
    }
}

/// One titled slide with its bullets and an optional illustration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            bullets,
            image_url: None,
        }
    }
}

/// A presentation title and its ordered slides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Attach an image to the slide at `index`. Returns `false` when the
    /// index is out of range.
    pub fn attach_image(&mut self, index: usize, url: String) -> bool {
        match self.slides.get_mut(index) {
            Some(slide) => {
                slide.image_url = Some(url);
                true
            }
            None => false,
        }
    }

    /// Replace the slide at `index`, returning the previous one.
    ///
    /// A replacement without an image inherits the image of the slide it
    /// replaces.
    pub fn replace_slide(&mut self, index: usize, mut slide: Slide) -> Option<Slide> {
        let current = self.slides.get_mut(index)?;
        if slide.image_url.is_none() {
            slide.image_url = current.image_url.clone();
        }
        Some(std::mem::replace(current, slide))
    }

    /// Remove the slide at `index`.
    pub fn remove_slide(&mut self, index: usize) -> Option<Slide> {
        (index < self.slides.len()).then(|| self.slides.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_parse_known_values() {
        assert_eq!(AudienceType::parse("student"), AudienceType::Student);
        assert_eq!(AudienceType::parse("Teacher"), AudienceType::Teacher);
        assert_eq!(
            AudienceType::parse(" professional "),
            AudienceType::Professional
        );
        assert_eq!(AudienceType::parse("general"), AudienceType::General);
    }

    #[test]
    fn test_audience_parse_unknown_falls_back_to_general() {
        assert_eq!(AudienceType::parse("unknown-value"), AudienceType::General);
        assert_eq!(AudienceType::parse(""), AudienceType::General);
    }

    #[test]
    fn test_generation_request_from_camel_case_json() {
        let request: GenerationRequest = serde_json::from_value(serde_json::json!({
            "topic": "Photosynthesis",
            "slideCount": 5,
            "audienceType": "student",
            "mode": "topic"
        }))
        .unwrap();

        assert_eq!(request.topic, "Photosynthesis");
        assert_eq!(request.slide_count, 5);
        assert_eq!(request.audience_type, AudienceType::Student);
        assert_eq!(request.mode, GenerationMode::Topic);
        assert!(request.sample_stats.is_none());
    }

    #[test]
    fn test_generation_request_defaults_and_lenient_enums() {
        let request: GenerationRequest = serde_json::from_value(serde_json::json!({
            "topic": "Rust",
            "audienceType": "martians",
            "mode": null
        }))
        .unwrap();

        assert_eq!(request.slide_count, 5);
        assert_eq!(request.audience_type, AudienceType::General);
        assert_eq!(request.mode, GenerationMode::Topic);
    }

    #[test]
    fn test_sample_analysis_ignores_extra_fields() {
        let request: GenerationRequest = serde_json::from_value(serde_json::json!({
            "topic": "Rust",
            "mode": "sample",
            "sampleAnalysis": {
                "slideCount": 5,
                "averageBulletsPerSlide": 4,
                "averageBulletLength": 12,
                "hasImages": false,
                "structure": "title-content-conclusion"
            }
        }))
        .unwrap();

        assert_eq!(request.mode, GenerationMode::Sample);
        let stats = request.sample_stats.unwrap();
        assert_eq!(stats.slide_count, 5);
        assert_eq!(stats.average_bullets_per_slide, 4.0);
        assert_eq!(stats.average_bullet_length, 12.0);
    }

    #[test]
    fn test_slide_edit_request_uses_presentation_topic() {
        let request: SlideEditRequest = serde_json::from_value(serde_json::json!({
            "currentSlide": {"title": "Old", "bullets": ["a", "b", "c"]},
            "editPrompt": "make it shorter",
            "presentationTopic": "Rust",
            "audienceType": "teacher"
        }))
        .unwrap();

        assert_eq!(request.topic, "Rust");
        assert_eq!(request.current_slide.title, "Old");
        assert_eq!(request.audience_type, AudienceType::Teacher);
    }

    #[test]
    fn test_slide_serializes_without_missing_image() {
        let slide = Slide::new("Overview", vec!["A".to_string()]);
        let value = serde_json::to_value(&slide).unwrap();
        assert_eq!(value, serde_json::json!({"title": "Overview", "bullets": ["A"]}));
    }

    #[test]
    fn test_attach_image_out_of_range() {
        let mut deck = Deck {
            title: "T".to_string(),
            slides: vec![Slide::new("One", vec![])],
        };

        assert!(deck.attach_image(0, "data:image/png;base64,AAAA".to_string()));
        assert!(!deck.attach_image(3, "ignored".to_string()));
        assert_eq!(
            deck.slides[0].image_url.as_deref(),
            Some("data:image/png;base64,AAAA")
        );
    }

    #[test]
    fn test_replace_slide_keeps_existing_image() {
        let mut deck = Deck {
            title: "T".to_string(),
            slides: vec![Slide::new("One", vec![])],
        };
        deck.attach_image(0, "img".to_string());

        let previous = deck
            .replace_slide(0, Slide::new("Two", vec!["x".to_string()]))
            .unwrap();

        assert_eq!(previous.title, "One");
        assert_eq!(deck.slides[0].title, "Two");
        assert_eq!(deck.slides[0].image_url.as_deref(), Some("img"));
        assert!(deck.replace_slide(9, Slide::default()).is_none());
    }

    #[test]
    fn test_remove_slide() {
        let mut deck = Deck {
            title: "T".to_string(),
            slides: vec![Slide::new("One", vec![]), Slide::new("Two", vec![])],
        };

        assert_eq!(deck.remove_slide(0).unwrap().title, "One");
        assert!(deck.remove_slide(5).is_none());
        assert_eq!(deck.slides.len(), 1);
    }
}

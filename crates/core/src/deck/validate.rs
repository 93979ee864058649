use serde_json::Value;
use thiserror::Error;

use super::types::{Deck, Slide};

/// Largest bullet list the prompts ask for.
pub const MAX_BULLETS: usize = 5;
/// Smallest bullet list the prompts ask for.
pub const MIN_BULLETS: usize = 3;
/// Word budget per bullet the prompts ask for.
pub const MAX_BULLET_WORDS: usize = 15;

/// A parsed model response that does not have the expected shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{path} must be a JSON object")]
    NotAnObject { path: String },

    #[error("missing required field `{path}`")]
    MissingField { path: String },

    #[error("{path} must be {expected}")]
    WrongType {
        path: String,
        expected: &'static str,
    },
}

/// Check that `value` is a deck object: `{ title: string, slides: [slide] }`.
pub fn validate_deck(value: &Value) -> Result<Deck, ValidationError> {
    let object = value.as_object().ok_or_else(|| ValidationError::NotAnObject {
        path: "response".to_string(),
    })?;

    let title = required_string(object.get("title"), "title")?;

    let slides = match object.get("slides") {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingField {
                path: "slides".to_string(),
            })
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::WrongType {
                path: "slides".to_string(),
                expected: "an array",
            })
        }
    };

    let slides = slides
        .iter()
        .enumerate()
        .map(|(i, item)| slide_at(item, &format!("slides[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Deck { title, slides })
}

/// Check that `value` is a slide object: `{ title: string, bullets: [string] }`.
pub fn validate_slide(value: &Value) -> Result<Slide, ValidationError> {
    slide_at(value, "slide")
}

fn slide_at(value: &Value, path: &str) -> Result<Slide, ValidationError> {
    let object = value.as_object().ok_or_else(|| ValidationError::NotAnObject {
        path: path.to_string(),
    })?;

    let title = required_string(object.get("title"), &format!("{path}.title"))?;

    let bullets = match object.get("bullets") {
        None | Some(Value::Null) => {
            return Err(ValidationError::MissingField {
                path: format!("{path}.bullets"),
            })
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::WrongType {
                path: format!("{path}.bullets"),
                expected: "an array of strings",
            })
        }
    };

    let bullets = bullets
        .iter()
        .enumerate()
        .map(|(i, bullet)| {
            bullet
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::WrongType {
                    path: format!("{path}.bullets[{i}]"),
                    expected: "a string",
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Slide::new(title, bullets))
}

fn required_string(value: Option<&Value>, path: &str) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField {
            path: path.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::WrongType {
            path: path.to_string(),
            expected: "a string",
        }),
    }
}

/// Describe how a slide deviates from the bullet count and length the
/// prompts request. Deviations are reported, never rejected.
pub fn slide_conformance(slide: &Slide) -> Vec<String> {
    let mut warnings = Vec::new();

    let count = slide.bullets.len();
    if !(MIN_BULLETS..=MAX_BULLETS).contains(&count) {
        warnings.push(format!(
            "\"{}\" has {count} bullets (expected {MIN_BULLETS}-{MAX_BULLETS})",
            slide.title
        ));
    }

    for (i, bullet) in slide.bullets.iter().enumerate() {
        let words = bullet.split_whitespace().count();
        if words > MAX_BULLET_WORDS {
            warnings.push(format!(
                "\"{}\" bullet {} has {words} words (expected under {MAX_BULLET_WORDS})",
                slide.title,
                i + 1
            ));
        }
    }

    warnings
}

/// [`slide_conformance`] for every slide of a deck.
pub fn conformance_warnings(deck: &Deck) -> Vec<String> {
    deck.slides.iter().flat_map(slide_conformance).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_deck_ok() {
        let deck = validate_deck(&json!({
            "title": "Photosynthesis",
            "slides": [{"title": "Overview", "bullets": ["A", "B", "C"]}]
        }))
        .unwrap();

        assert_eq!(deck.title, "Photosynthesis");
        assert_eq!(deck.slides.len(), 1);
        assert_eq!(deck.slides[0].bullets, vec!["A", "B", "C"]);
        assert!(deck.slides[0].image_url.is_none());
    }

    #[test]
    fn test_validate_deck_missing_slides() {
        let err = validate_deck(&json!({"title": "T"})).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                path: "slides".to_string()
            }
        );
        assert_eq!(err.to_string(), "missing required field `slides`");
    }

    #[test]
    fn test_validate_deck_not_an_object() {
        let err = validate_deck(&json!(["a"])).unwrap_err();
        assert_eq!(err.to_string(), "response must be a JSON object");
    }

    #[test]
    fn test_validate_deck_reports_nested_path() {
        let err = validate_deck(&json!({
            "title": "T",
            "slides": [
                {"title": "One", "bullets": ["a"]},
                {"title": "Two", "bullets": ["a", 2]}
            ]
        }))
        .unwrap_err();

        assert_eq!(err.to_string(), "slides[1].bullets[1] must be a string");
    }

    #[test]
    fn test_validate_slide_ok() {
        let slide = validate_slide(&json!({"title": "X", "bullets": ["a", "b"]})).unwrap();
        assert_eq!(slide, Slide::new("X", vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_validate_slide_missing_title() {
        let err = validate_slide(&json!({"bullets": []})).unwrap_err();
        assert_eq!(err.to_string(), "missing required field `slide.title`");
    }

    #[test]
    fn test_validate_slide_wrong_bullets_type() {
        let err = validate_slide(&json!({"title": "X", "bullets": "a, b"})).unwrap_err();
        assert_eq!(err.to_string(), "slide.bullets must be an array of strings");
    }

    #[test]
    fn test_conformance_warnings() {
        let deck = Deck {
            title: "T".to_string(),
            slides: vec![
                Slide::new("Good", vec!["a".into(), "b".into(), "c".into()]),
                Slide::new("Short", vec!["a".into()]),
                Slide::new(
                    "Wordy",
                    vec![
                        "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen".into(),
                        "b".into(),
                        "c".into(),
                    ],
                ),
            ],
        };

        let warnings = conformance_warnings(&deck);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("\"Short\" has 1 bullets"));
        assert!(warnings[1].contains("\"Wordy\" bullet 1 has 16 words"));
    }
}

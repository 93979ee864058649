use crate::invoker::ModelInvoker;
use crate::parse::parse_slide;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use deckgen_core::deck::{
    build_slide_edit_prompt, AudienceType, Deck, Slide, SlideEditRequest,
};
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct RegenerateOptions {
    /// Deck JSON file, as written by `generate --output`
    #[arg(short, long)]
    pub deck: PathBuf,

    /// Slide number to rewrite (1-indexed)
    #[arg(short, long)]
    pub index: usize,

    /// What to change about the slide
    #[arg(short, long)]
    pub prompt: String,

    /// Presentation topic (defaults to the deck title)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Target audience: student, teacher, professional, general
    #[arg(short, long, default_value = "general")]
    pub audience: String,

    /// Print the new slide without writing the deck file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the new slide as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: RegenerateOptions, global: crate::Global) -> Result<()> {
    let content = tokio::fs::read_to_string(&options.deck)
        .await
        .map_err(|e| eyre!("Failed to read deck '{}': {}", options.deck.display(), e))?;
    let mut deck: Deck = serde_json::from_str(&content)
        .with_context(|| format!("Invalid deck file '{}'", options.deck.display()))?;

    let position = slide_position(&deck, options.index)?;

    let request = SlideEditRequest {
        current_slide: deck.slides[position].clone(),
        edit_prompt: options.prompt.clone(),
        topic: options.topic.clone().unwrap_or_else(|| deck.title.clone()),
        audience_type: AudienceType::parse(&options.audience),
    };

    if global.verbose {
        eprintln!(
            "Regenerating slide {} (\"{}\")...",
            options.index, request.current_slide.title
        );
    }

    let invoker = ModelInvoker::new(global.model.clone());
    let slide = regenerate_slide_data(&invoker, &request).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&slide)?);
    } else {
        println!("{}", slide.title.bold());
        for bullet in &slide.bullets {
            println!("  - {bullet}");
        }
    }

    if !options.dry_run {
        deck.replace_slide(position, slide);
        tokio::fs::write(&options.deck, serde_json::to_string_pretty(&deck)?)
            .await
            .map_err(|e| eyre!("Failed to write '{}': {}", options.deck.display(), e))?;
        if global.verbose {
            eprintln!("Deck updated: {}", options.deck.display());
        }
    }

    Ok(())
}

/// Rewrite one slide according to the edit instruction.
pub async fn regenerate_slide_data(
    invoker: &ModelInvoker,
    request: &SlideEditRequest,
) -> Result<Slide, Error> {
    log::info!("Regenerating slide with prompt: {}", request.edit_prompt);

    let prompt = build_slide_edit_prompt(request);
    let text = invoker.complete(&prompt).await?;
    let slide = parse_slide(&text)?;

    log::info!("Successfully regenerated slide: {}", slide.title);

    Ok(slide)
}

/// Convert a 1-indexed slide number into a position in the deck.
fn slide_position(deck: &Deck, number: usize) -> Result<usize> {
    if number == 0 || number > deck.slides.len() {
        return Err(eyre!(
            "Slide {} does not exist; the deck has {} slides",
            number,
            deck.slides.len()
        ));
    }
    Ok(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn edit_request() -> SlideEditRequest {
        SlideEditRequest {
            current_slide: Slide::new("Old", vec!["one".to_string(), "two".to_string()]),
            edit_prompt: "make it punchier".to_string(),
            topic: "Rust".to_string(),
            audience_type: AudienceType::General,
        }
    }

    #[tokio::test]
    async fn test_regenerate_slide_repairs_trailing_comma() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("make it punchier"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "{\"title\":\"X\",\"bullets\":[\"a\",\"b\",]}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let invoker = ModelInvoker::new(ModelConfig::new(Some("k".to_string()), server.uri()));

        let slide = regenerate_slide_data(&invoker, &edit_request()).await.unwrap();

        assert_eq!(slide, Slide::new("X", vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_regenerate_slide_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .expect(1)
            .mount(&server)
            .await;
        let invoker = ModelInvoker::new(ModelConfig::new(Some("k".to_string()), server.uri()));

        let err = regenerate_slide_data(&invoker, &edit_request())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Upstream { status: 503, .. }));
    }

    #[test]
    fn test_slide_position() {
        let deck = Deck {
            title: "T".to_string(),
            slides: vec![Slide::default(), Slide::default()],
        };

        assert_eq!(slide_position(&deck, 1).unwrap(), 0);
        assert_eq!(slide_position(&deck, 2).unwrap(), 1);
        assert!(slide_position(&deck, 0).is_err());
        assert!(slide_position(&deck, 3).is_err());
    }
}

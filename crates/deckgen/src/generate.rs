use crate::invoker::ModelInvoker;
use crate::parse::parse_deck;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use deckgen_core::deck::outline::shorten_data_url;
use deckgen_core::deck::{
    build_deck_prompt, render_outline, AudienceType, Deck, GenerationMode, GenerationRequest,
    SampleStats, SlideImageRequest,
};
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub struct GenerateOptions {
    /// Topic of the presentation
    pub topic: String,

    /// Number of slides
    #[arg(short, long, default_value = "5", value_parser = clap::value_parser!(u32).range(3..=15))]
    pub slides: u32,

    /// Target audience: student, teacher, professional, general
    #[arg(short, long, default_value = "general")]
    pub audience: String,

    /// Slide count of a sample deck whose structure should be matched
    #[arg(long, requires = "sample_bullets", requires = "sample_length")]
    pub sample_slides: Option<i64>,

    /// Average bullets per slide in the sample deck
    #[arg(long, requires = "sample_slides")]
    pub sample_bullets: Option<f64>,

    /// Average bullet length, in words, in the sample deck
    #[arg(long, requires = "sample_slides")]
    pub sample_length: Option<f64>,

    /// Generate an illustration for every slide, one at a time
    #[arg(long)]
    pub images: bool,

    /// Write the deck as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the deck as JSON
    #[arg(long, conflicts_with = "markdown")]
    pub json: bool,

    /// Print the deck as a markdown outline
    #[arg(long)]
    pub markdown: bool,
}

impl GenerateOptions {
    pub fn to_request(&self) -> GenerationRequest {
        let sample_stats = self.sample_slides.map(|slide_count| SampleStats {
            slide_count,
            average_bullets_per_slide: self.sample_bullets.unwrap_or_default(),
            average_bullet_length: self.sample_length.unwrap_or_default(),
        });

        GenerationRequest {
            topic: self.topic.clone(),
            slide_count: self.slides,
            audience_type: AudienceType::parse(&self.audience),
            mode: if sample_stats.is_some() {
                GenerationMode::Sample
            } else {
                GenerationMode::Topic
            },
            sample_stats,
        }
    }
}

/// Which slides got an illustration and which were skipped, with the reason.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IllustrationReport {
    pub attached: Vec<usize>,
    pub skipped: Vec<(usize, String)>,
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let invoker = ModelInvoker::new(global.model.clone());
    let request = options.to_request();

    if global.verbose {
        eprintln!("Model: {}", invoker.config().model);
        eprintln!(
            "Generating {} slides about \"{}\" for a {} audience...",
            request.slide_count,
            request.topic,
            request.audience_type.as_str()
        );
    }

    let mut deck = generate_deck_data(&invoker, &request).await?;

    if options.images {
        let report = illustrate_deck(&invoker, &mut deck, &request.topic).await;
        if !report.skipped.is_empty() {
            eprintln!(
                "{}",
                format!(
                    "Generated {} of {} images",
                    report.attached.len(),
                    deck.slides.len()
                )
                .yellow()
            );
        }
    }

    if let Some(path) = &options.output {
        let json = serde_json::to_string_pretty(&deck)?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| eyre!("Failed to write '{}': {}", path.display(), e))?;
        if global.verbose {
            eprintln!("Deck written to {}", path.display());
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
    } else if options.markdown {
        println!("{}", render_outline(&deck));
    } else {
        print_deck_table(&deck);
    }

    Ok(())
}

/// Generate a full deck from a topic in a single model call.
pub async fn generate_deck_data(
    invoker: &ModelInvoker,
    request: &GenerationRequest,
) -> Result<Deck, Error> {
    let prompt = build_deck_prompt(request);
    let text = invoker.complete(&prompt).await?;
    let deck = parse_deck(&text)?;

    log::info!(
        "Generated deck \"{}\" with {} slides",
        deck.title,
        deck.slides.len()
    );

    Ok(deck)
}

/// Illustrate every slide, strictly in deck order and one request at a time.
///
/// A failed image never fails the deck: the slide keeps no image, the
/// failure is logged and recorded in the report, and the walk continues.
pub async fn illustrate_deck(
    invoker: &ModelInvoker,
    deck: &mut Deck,
    topic: &str,
) -> IllustrationReport {
    let mut report = IllustrationReport::default();

    for index in 0..deck.slides.len() {
        let request = SlideImageRequest::for_slide(&deck.slides[index], topic);

        match crate::image::generate_image_data(invoker, &request).await {
            Ok(url) => {
                deck.attach_image(index, url);
                report.attached.push(index);
            }
            Err(e) => {
                log::warn!(
                    "Skipping image for slide {} (\"{}\"): {}",
                    index + 1,
                    request.slide_title,
                    e
                );
                report.skipped.push((index, e.to_string()));
            }
        }
    }

    report
}

fn print_deck_table(deck: &Deck) {
    println!("\n{}\n", deck.title.bold());

    let mut table = new_table(&["#", "Title", "Bullets", "Image"]);
    for (i, slide) in deck.slides.iter().enumerate() {
        table.add_row(prettytable::row![
            i + 1,
            slide.title,
            slide.bullets.join("\n"),
            slide
                .image_url
                .as_deref()
                .map(shorten_data_url)
                .unwrap_or_else(|| "-".to_string())
        ]);
    }
    table.printstd();
}

use crate::invoker::ModelInvoker;
use crate::prelude::{eprintln, println, *};
use base64::Engine;
use deckgen_core::completion::extract_image_url;
use deckgen_core::deck::outline::shorten_data_url;
use deckgen_core::deck::{build_image_prompt, SlideImageRequest};
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Args)]
pub struct ImageOptions {
    /// Title of the slide to illustrate
    pub title: String,

    /// Slide bullet (repeatable); the first two are used as key points
    #[arg(short, long = "bullet")]
    pub bullets: Vec<String>,

    /// Presentation topic (defaults to the slide title)
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Save the image to this file instead of printing its URL
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(options: ImageOptions, global: crate::Global) -> Result<()> {
    let invoker = ModelInvoker::new(global.model.clone());

    let request = SlideImageRequest {
        slide_title: options.title,
        slide_bullets: options.bullets,
        presentation_topic: options.topic,
    };

    if global.verbose {
        eprintln!("Image model: {}", invoker.config().image_model);
        eprintln!("Prompt: {}", build_image_prompt(&request));
    }

    let url = generate_image_data(&invoker, &request).await?;

    match options.output {
        Some(path) => {
            save_image(&url, &path).await?;
            println!("Saved {} ({})", path.display(), shorten_data_url(&url));
        }
        None => println!("{url}"),
    }

    Ok(())
}

/// Generate an illustration for one slide and return its URL (usually a
/// base64 `data:` URL).
pub async fn generate_image_data(
    invoker: &ModelInvoker,
    request: &SlideImageRequest,
) -> Result<String, Error> {
    if request.slide_title.trim().is_empty() {
        return Err(Error::InvalidRequest("Slide title is required".to_string()));
    }

    let prompt = build_image_prompt(request);
    log::info!("Generating image with prompt: {prompt}");

    let body = invoker.generate_image(&prompt).await?;

    extract_image_url(&body).ok_or_else(|| {
        log::error!("No image in response: {body}");
        Error::NoImage
    })
}

/// Decode the payload of a base64 `data:` URL.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>> {
    let (_, payload) = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .ok_or_else(|| eyre!("Not a base64 data URL: {}", shorten_data_url(url)))?;

    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .context("Invalid base64 image payload")
}

async fn save_image(url: &str, path: &Path) -> Result<()> {
    let bytes = if url.starts_with("data:") {
        decode_data_url(url)?
    } else {
        let response = reqwest::get(url)
            .await
            .map_err(|e| eyre!("Failed to download image {}: {}", url, e))?;
        if !response.status().is_success() {
            return Err(eyre!(
                "Failed to download image {}: HTTP {}",
                url,
                response.status()
            ));
        }
        response.bytes().await?.to_vec()
    };

    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| eyre!("Failed to write '{}': {}", path.display(), e))
}

use super::types::Deck;

/// Render a deck as a markdown outline: one `##` heading per slide followed
/// by its bullets.
pub fn render_outline(deck: &Deck) -> String {
    let mut out = format!("# {}\n", deck.title);

    for (i, slide) in deck.slides.iter().enumerate() {
        out.push_str(&format!("\n## {}. {}\n\n", i + 1, slide.title));
        for bullet in &slide.bullets {
            out.push_str(&format!("- {bullet}\n"));
        }
        if let Some(url) = &slide.image_url {
            out.push_str(&format!("\n![{}]({})\n", slide.title, shorten_data_url(url)));
        }
    }

    out
}

/// Data URLs can be megabytes long; keep only the media type for display.
pub fn shorten_data_url(url: &str) -> String {
    match url.strip_prefix("data:") {
        Some(rest) => {
            let media_type = rest.split([';', ',']).next().unwrap_or_default();
            format!("data:{media_type},…")
        }
        None => url.to_string(),
    }
}

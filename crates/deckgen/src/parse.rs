use crate::prelude::Error;
use deckgen_core::deck::validate::slide_conformance;
use deckgen_core::deck::{
    conformance_warnings, extract_json, validate_deck, validate_slide, Deck, ExtractError, Slide,
};
use serde_json::Value;

/// Turn a raw deck completion into a [`Deck`].
pub fn parse_deck(text: &str) -> Result<Deck, Error> {
    let value = extract_logged(text)?;
    let deck = validate_deck(&value).inspect_err(|e| {
        log::error!("Deck response failed validation: {e}");
    })?;

    for warning in conformance_warnings(&deck) {
        log::warn!("{warning}");
    }

    Ok(deck)
}

/// Turn a raw slide completion into a [`Slide`].
pub fn parse_slide(text: &str) -> Result<Slide, Error> {
    let value = extract_logged(text)?;
    let slide = validate_slide(&value).inspect_err(|e| {
        log::error!("Slide response failed validation: {e}");
    })?;

    for warning in slide_conformance(&slide) {
        log::warn!("{warning}");
    }

    Ok(slide)
}

fn extract_logged(text: &str) -> Result<Value, Error> {
    extract_json(text).map_err(|e| {
        match &e {
            ExtractError::NoJson => log::error!("No JSON found in response: {text}"),
            ExtractError::Malformed { cleaned, message } => {
                log::error!("JSON parse error: {message}, raw JSON: {cleaned}")
            }
        }
        Error::Extraction(e)
    })
}

//! Core library for deckgen
//!
//! This crate implements the **Functional Core** of the deckgen application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`deckgen_core`** (this crate): Pure transformation functions with zero I/O
//! - **`deckgen`**: HTTP calls to the model, the HTTP server and the CLI (the Imperative Shell)
//!
//! Every function here is deterministic and testable with fixture strings:
//! prompts are built from requests, model responses are turned back into
//! decks, and nothing touches the network.
//!
//! # Module Organization
//!
//! - [`deck`]: Deck data model, prompt construction, JSON recovery from model
//!   output, shape validation and outline rendering
//! - [`completion`]: Chat-completion request bodies and response reading
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use deckgen_core::deck::{extract_json, validate_deck};
//!
//! let response = "```json\n{\"title\":\"T\",\"slides\":[]}\n```";
//! let deck = validate_deck(&extract_json(response)?)?;
//! assert_eq!(deck.title, "T");
//! ```

pub mod completion;
pub mod deck;

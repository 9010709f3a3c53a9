//! Cards and the standard deck.
//!
//! ## Key Types
//!
//! - `Color`, `Rank`: printed card properties
//! - `Card`: immutable card value
//! - `deck`: 108-card deck construction and composition checks

pub mod card;
pub mod deck;

pub use card::{Card, Color, Rank};
pub use deck::{standard_deck, validate_composition, DeckError, DeckSummary, DECK_SIZE};

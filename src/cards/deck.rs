//! Standard 108-card deck construction and composition checks.
//!
//! | Cards | Per color | Total |
//! |---|---|---|
//! | `0` | 1 | 4 |
//! | `1`-`9` | 2 each | 72 |
//! | Skip, Reverse, Draw Two | 2 each | 24 |
//! | Wild, Wild Draw Four | - | 4 each, 8 |

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::card::{Card, Color, Rank};

/// Cards in a complete deck.
pub const DECK_SIZE: usize = 108;

/// Composition mismatch.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck holds {actual} cards, expected {expected}")]
    WrongSize { expected: usize, actual: usize },
    #[error("deck holds {actual} copies of {card}, expected {expected}")]
    WrongCount { card: Card, expected: usize, actual: usize },
    #[error("{0} is not part of the standard deck")]
    UnknownCard(Card),
    #[error("no copy of {0} left to place")]
    Exhausted(Card),
}

/// Copies of `card` in a standard deck (0 for cards that do not exist).
#[must_use]
pub fn copies_in_deck(card: Card) -> usize {
    match (card.color, card.rank) {
        (Color::Wild, Rank::Wild | Rank::WildDrawFour) => 4,
        (Color::Wild, _) | (_, Rank::Wild | Rank::WildDrawFour) => 0,
        (_, Rank::Number(0)) => 1,
        (_, Rank::Number(1..=9)) => 2,
        (_, Rank::Number(_)) => 0,
        (_, Rank::Skip | Rank::Reverse | Rank::DrawTwo) => 2,
    }
}

/// Build the standard deck in a fixed order (unshuffled).
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for color in Color::CHOOSABLE {
        cards.push(Card::number(color, 0));
        for value in 1..=9 {
            cards.push(Card::number(color, value));
            cards.push(Card::number(color, value));
        }
        for rank in Rank::ACTIONS {
            cards.push(Card::new(color, rank));
            cards.push(Card::new(color, rank));
        }
    }

    for _ in 0..4 {
        cards.push(Card::wild());
        cards.push(Card::wild_draw_four());
    }

    cards
}

/// Verify that `cards` is exactly one standard deck.
pub fn validate_composition(cards: &[Card]) -> Result<(), DeckError> {
    if cards.len() != DECK_SIZE {
        return Err(DeckError::WrongSize {
            expected: DECK_SIZE,
            actual: cards.len(),
        });
    }

    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    for &card in cards {
        if copies_in_deck(card) == 0 {
            return Err(DeckError::UnknownCard(card));
        }
        *counts.entry(card).or_default() += 1;
    }

    // Sorted so the first reported mismatch is stable.
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_unstable();
    for (card, actual) in entries {
        let expected = copies_in_deck(card);
        if actual != expected {
            return Err(DeckError::WrongCount { card, expected, actual });
        }
    }

    Ok(())
}

/// Card counts by family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckSummary {
    pub numbers: usize,
    pub actions: usize,
    pub wilds: usize,
}

/// Count cards by family.
#[must_use]
pub fn summarize(cards: &[Card]) -> DeckSummary {
    cards.iter().fold(DeckSummary::default(), |mut acc, card| {
        if card.is_number() {
            acc.numbers += 1;
        } else if card.is_wild() {
            acc.wilds += 1;
        } else {
            acc.actions += 1;
        }
        acc
    })
}

/// Remove one copy of `card` from `cards`.
pub(crate) fn take_card(cards: &mut Vec<Card>, card: Card) -> Result<Card, DeckError> {
    if copies_in_deck(card) == 0 {
        return Err(DeckError::UnknownCard(card));
    }
    let pos = cards
        .iter()
        .position(|&c| c == card)
        .ok_or(DeckError::Exhausted(card))?;
    Ok(cards.swap_remove(pos))
}

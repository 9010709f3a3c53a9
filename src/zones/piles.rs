//! Draw and discard piles.
//!
//! Both piles are ordered with the back of the `Vec` as the top:
//! the back of the draw pile is the next card drawn, the back of the
//! discard pile is the active card.
//!
//! ```
//! use uno_engine::cards::{Card, Color};
//! use uno_engine::core::GameRng;
//! use uno_engine::zones::Piles;
//!
//! let mut rng = GameRng::new(1);
//! let mut piles = Piles::new(vec![Card::number(Color::Red, 1)]);
//! piles.discard(Card::number(Color::Red, 2));
//! piles.discard(Card::number(Color::Red, 3));
//!
//! // The first draw empties the pile, the second triggers a reshuffle.
//! assert!(piles.draw(&mut rng).unwrap().reshuffled.is_none());
//! let drawn = piles.draw(&mut rng).unwrap();
//! assert_eq!(drawn.reshuffled, Some(1));
//! assert_eq!(piles.top(), Some(Card::number(Color::Red, 3)));
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cards::Card;
use crate::core::error::EngineError;
use crate::core::rng::GameRng;

/// A card taken from the draw pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drawn {
    pub card: Card,
    /// Cards moved from the discard pile by a reshuffle before this draw.
    pub reshuffled: Option<usize>,
}

/// The shared draw and discard piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    draw: Vec<Card>,
    discard: Vec<Card>,
}

impl Piles {
    /// Create piles with the given draw pile (back = next draw) and an empty discard.
    #[must_use]
    pub fn new(draw: Vec<Card>) -> Self {
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    /// Create piles from explicit contents.
    #[must_use]
    pub fn from_parts(draw: Vec<Card>, discard: Vec<Card>) -> Self {
        Self { draw, discard }
    }

    /// Cards in the draw pile, bottom first.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    /// Cards in the discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    /// The active card.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.discard.last().copied()
    }

    /// Total cards across both piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    /// Check if both piles are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw.is_empty() && self.discard.is_empty()
    }

    /// Place a card on the discard pile, making it the active card.
    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    /// Move every discard except the active card into the draw pile and shuffle.
    ///
    /// Returns the number of cards moved. Fails when the discard pile holds
    /// one card or fewer, because nothing can be recycled.
    pub fn reshuffle(&mut self, rng: &mut GameRng) -> Result<usize, EngineError> {
        if self.discard.len() <= 1 {
            return Err(EngineError::EmptyDrawUnavailable);
        }

        let top = self.discard.pop();
        let moved = self.discard.len();
        self.draw.append(&mut self.discard);
        self.discard.extend(top);
        rng.shuffle(&mut self.draw);

        trace!(moved, "reshuffled discard pile into draw pile");
        Ok(moved)
    }

    /// Draw one card, reshuffling first if the draw pile is empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Result<Drawn, EngineError> {
        let reshuffled = if self.draw.is_empty() {
            Some(self.reshuffle(rng)?)
        } else {
            None
        };

        let card = self.draw.pop().ok_or(EngineError::EmptyDrawUnavailable)?;
        Ok(Drawn { card, reshuffled })
    }
}

//! Opponent strategies for computer seats.
//!
//! A strategy sees the computer's own hand and the table, and answers two
//! questions: which card to play (or draw instead), and which color to name
//! after a wild. The engine re-checks every choice, so a strategy can never
//! make an illegal move.

mod priority;
mod random;

pub use priority::PriorityStrategy;
pub use random::RandomStrategy;

use crate::cards::{Card, Color};
use crate::core::player::PlayerId;
use crate::core::state::TableState;
use crate::rules::legality;

/// What a computer seat wants to do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyChoice {
    /// Play the card at this index in the hand.
    Play(usize),
    /// Draw (pays a pending draw, or draws until playable).
    Draw,
}

/// Policy for computer seats.
pub trait OpponentStrategy: Send {
    /// Pick a card to play, or draw.
    fn choose_action(&mut self, hand: &[Card], state: &TableState, me: PlayerId) -> StrategyChoice;

    /// Pick the color for a wild just played, given the cards left in hand.
    fn choose_color(&self, hand: &[Card]) -> Color {
        most_held_color(hand)
    }
}

/// The non-wild color held most often. Ties go to the earlier color in
/// Red, Green, Blue, Yellow order; an all-wild or empty hand gives Red.
///
/// ```
/// use uno_engine::cards::{Card, Color};
/// use uno_engine::opponents::most_held_color;
///
/// let hand = [Card::skip(Color::Blue), Card::number(Color::Blue, 2), Card::number(Color::Green, 5)];
/// assert_eq!(most_held_color(&hand), Color::Blue);
/// assert_eq!(most_held_color(&[Card::wild()]), Color::Red);
/// ```
#[must_use]
pub fn most_held_color(hand: &[Card]) -> Color {
    let mut best = Color::Red;
    let mut best_count = 0;
    for color in Color::CHOOSABLE {
        let count = hand.iter().filter(|card| card.color == color).count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

/// Indices of the cards in `hand` that the current seat may legally play.
#[must_use]
pub fn legal_cards(hand: &[Card], state: &TableState) -> Vec<usize> {
    hand.iter()
        .enumerate()
        .filter(|&(_, &card)| legality::check_play(state, card).is_ok())
        .map(|(index, _)| index)
        .collect()
}

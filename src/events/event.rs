//! Game events.
//!
//! Events describe what an applied intent did, in the order it happened.
//! Presentation layers render them with `Display`; network relays can
//! forward the serialized form.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};
use crate::core::{Direction, PlayerId};

/// Something that happened at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    /// A card moved from a hand to the discard pile.
    CardPlayed { player: PlayerId, card: Card },
    /// `player` played out of turn with an identical card.
    JumpedIn { player: PlayerId, card: Card },
    /// A wild card's color was named.
    ColorChosen { player: PlayerId, color: Color },
    /// Cards drawn as a free draw or to pay a pending draw.
    CardsDrawn { player: PlayerId, count: u32 },
    /// Cards drawn for missing the special call.
    PenaltyApplied { player: PlayerId, count: u32 },
    /// A draw card raised the pending draw.
    DrawAccumulated { total: u32 },
    /// A seat lost its turn.
    PlayerSkipped { player: PlayerId },
    /// Play direction flipped.
    DirectionReversed { direction: Direction },
    /// Discards were recycled into the draw pile.
    Reshuffled { cards: usize },
    /// A draw was required but no card was available.
    DrawUnavailable { player: PlayerId },
    /// `player` declared the special call.
    SpecialCallDeclared { player: PlayerId },
    /// `player` ended their turn after a free draw.
    TurnEnded { player: PlayerId },
    /// The turn passed to `player`.
    TurnStarted { player: PlayerId },
    /// `player` emptied their hand.
    GameWon { player: PlayerId, score: u32 },
}

impl GameEvent {
    /// The seat this event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CardPlayed { player, .. }
            | GameEvent::JumpedIn { player, .. }
            | GameEvent::ColorChosen { player, .. }
            | GameEvent::CardsDrawn { player, .. }
            | GameEvent::PenaltyApplied { player, .. }
            | GameEvent::PlayerSkipped { player }
            | GameEvent::DrawUnavailable { player }
            | GameEvent::SpecialCallDeclared { player }
            | GameEvent::TurnEnded { player }
            | GameEvent::TurnStarted { player }
            | GameEvent::GameWon { player, .. } => Some(*player),
            GameEvent::DrawAccumulated { .. }
            | GameEvent::DirectionReversed { .. }
            | GameEvent::Reshuffled { .. } => None,
        }
    }
}

fn cards(count: u32) -> &'static str {
    if count == 1 {
        "card"
    } else {
        "cards"
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::CardPlayed { player, card } => write!(f, "{} played {}", player, card),
            GameEvent::JumpedIn { player, card } => write!(f, "{} jumped in with {}", player, card),
            GameEvent::ColorChosen { player, color } => write!(f, "{} chose {}", player, color),
            GameEvent::CardsDrawn { player, count } => {
                write!(f, "{} drew {} {}", player, count, cards(*count))
            }
            GameEvent::PenaltyApplied { player, count } => write!(
                f,
                "{} forgot to call Uno and drew {} penalty {}",
                player,
                count,
                cards(*count)
            ),
            GameEvent::DrawAccumulated { total } => {
                write!(f, "Next player must draw {} {}", total, cards(*total))
            }
            GameEvent::PlayerSkipped { player } => write!(f, "{} was skipped", player),
            GameEvent::DirectionReversed { direction } => write!(f, "Play now goes {}", direction),
            GameEvent::Reshuffled { cards } => {
                write!(f, "Reshuffled {} discarded cards into the draw pile", cards)
            }
            GameEvent::DrawUnavailable { player } => {
                write!(f, "{} could not draw: no cards left", player)
            }
            GameEvent::SpecialCallDeclared { player } => write!(f, "{} called Uno!", player),
            GameEvent::TurnEnded { player } => write!(f, "{} ended their turn", player),
            GameEvent::TurnStarted { player } => write!(f, "It is {}'s turn", player),
            GameEvent::GameWon { player, score } => {
                write!(f, "{} won the game with {} points", player, score)
            }
        }
    }
}

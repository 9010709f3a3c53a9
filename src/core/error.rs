//! Intent rejection reasons.
//!
//! Every variant is recoverable: a rejected intent leaves the table
//! untouched. Card conservation is the one invariant checked with an
//! assertion instead, since breaking it is a bug in the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlayerId;

/// Why the engine rejected an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum EngineError {
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("that card cannot be played now")]
    InvalidCard,
    #[error("uno can only be called while holding exactly one card")]
    InvalidCall,
    #[error("player has no cards left")]
    AlreadyWon,
    #[error("no card can be drawn: draw pile is empty and nothing can be reshuffled")]
    EmptyDrawUnavailable,
    #[error("no color choice is expected from this player, or the color is not choosable")]
    InvalidColorChoice,
    #[error("the game is over")]
    GameAlreadyOver,
    #[error("a wild color must be chosen first")]
    ColorChoicePending,
    #[error("{player} is not seated at this table")]
    UnknownPlayer { player: PlayerId },
}

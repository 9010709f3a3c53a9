//! Card legality checks.
//!
//! These are pure functions of the table so opponent strategies and client
//! pre-checks can share them with the engine.

use crate::cards::Card;
use crate::core::error::EngineError;
use crate::core::state::{Phase, TableState};

/// Check if `card` matches the active color or the top card's rank, or is wild.
#[must_use]
pub fn matches_active(state: &TableState, card: Card) -> bool {
    card.is_wild()
        || card.color == state.active_color()
        || state.top_card().is_some_and(|top| top.rank == card.rank)
}

/// Check if the current seat may play `card`, ignoring the free-draw restriction.
///
/// While a pending draw is owed only draw cards may be played, and only
/// when stacking is enabled.
#[must_use]
pub fn can_play(state: &TableState, card: Card) -> bool {
    if state.pending_draw() > 0 {
        return state.rules().draw_stacking_enabled && card.is_draw_card() && matches_active(state, card);
    }
    matches_active(state, card)
}

/// Full legality check for a play by the current seat.
///
/// After a free draw, only the drawn card may be played.
pub fn check_play(state: &TableState, card: Card) -> Result<(), EngineError> {
    if state.drawn_this_turn().is_some_and(|drawn| drawn != card) {
        return Err(EngineError::InvalidCard);
    }
    if !can_play(state, card) {
        return Err(EngineError::InvalidCard);
    }
    Ok(())
}

/// Check if a seat other than the current one may jump in with `card`.
///
/// The card must be identical to the top card, in the active color, not
/// wild, and no pending draw may be owed.
#[must_use]
pub fn can_jump_in(state: &TableState, card: Card) -> bool {
    state.rules().jump_in_enabled
        && matches!(
            state.phase(),
            Phase::AwaitingMove | Phase::AwaitingSpecialCallWindow { .. }
        )
        && state.pending_draw() == 0
        && !card.is_wild()
        && card.color == state.active_color()
        && state.top_card() == Some(card)
}

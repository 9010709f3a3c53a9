//! Per-viewer table snapshots.
//!
//! A snapshot is what rendering and transport layers consume. The
//! viewer's own hand is shown in full; every other hand is reduced to a
//! count so a networked client never learns hidden cards.
//!
//! Snapshots serialize to JSON for web clients and to a compact bincode
//! form for relays broadcasting the same table to many clients.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::{Direction, Phase, TableState};
use crate::cards::{Card, Color};

/// One seat's hand as seen by the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandView {
    /// The viewer's own hand.
    Visible { cards: Vec<Card> },
    /// Someone else's hand.
    Hidden { count: usize },
}

impl HandView {
    /// Number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            HandView::Visible { cards } => cards.len(),
            HandView::Hidden { count } => *count,
        }
    }

    /// Check if the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The cards, if visible to the viewer.
    #[must_use]
    pub fn cards(&self) -> Option<&[Card]> {
        match self {
            HandView::Visible { cards } => Some(cards),
            HandView::Hidden { .. } => None,
        }
    }
}

/// Read-only view of a table for one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Seat the snapshot was built for; `None` for a spectator.
    pub viewer: Option<PlayerId>,
    pub top_card: Option<Card>,
    pub active_color: Color,
    pub hands: Vec<HandView>,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub pending_draw: u32,
    pub phase: Phase,
    pub vulnerable: Vec<bool>,
    pub draw_pile_size: usize,
    pub turn_number: u32,
    pub is_terminal: bool,
    pub winner: Option<PlayerId>,
    pub winner_score: Option<u32>,
}

impl TableSnapshot {
    /// Build the view of `state` for `viewer`.
    #[must_use]
    pub fn for_viewer(state: &TableState, viewer: Option<PlayerId>) -> Self {
        let hands = state
            .player_ids()
            .map(|p| {
                if Some(p) == viewer {
                    HandView::Visible {
                        cards: state.hand(p).to_vec(),
                    }
                } else {
                    HandView::Hidden {
                        count: state.hand(p).len(),
                    }
                }
            })
            .collect();

        Self {
            viewer,
            top_card: state.top_card(),
            active_color: state.active_color(),
            hands,
            current_player: state.current_player(),
            direction: state.direction(),
            pending_draw: state.pending_draw(),
            phase: state.phase(),
            vulnerable: state.player_ids().map(|p| state.is_vulnerable(p)).collect(),
            draw_pile_size: state.piles().draw_pile().len(),
            turn_number: state.turn_number(),
            is_terminal: state.is_over(),
            winner: state.winner(),
            winner_score: state.winner_score(),
        }
    }

    /// The viewer's own cards, if the viewer is seated.
    #[must_use]
    pub fn own_hand(&self) -> Option<&[Card]> {
        let viewer = self.viewer?;
        self.hands.get(viewer.index()).and_then(HandView::cards)
    }

    /// Encode for broadcast.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a broadcast snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_view_len() {
        let visible = HandView::Visible {
            cards: vec![Card::wild(), Card::number(Color::Red, 1)],
        };
        let hidden = HandView::Hidden { count: 0 };

        assert_eq!(visible.len(), 2);
        assert!(visible.cards().is_some());
        assert!(hidden.is_empty());
        assert!(hidden.cards().is_none());
    }

    #[test]
    fn test_hand_view_json_shape() {
        let json = serde_json::to_string(&HandView::Hidden { count: 3 }).unwrap();
        assert_eq!(json, r#"{"hidden":{"count":3}}"#);
    }
}

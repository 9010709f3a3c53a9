//! Player intents: what a seat asks the engine to do.
//!
//! An intent is a kind (the "verb") plus the seat submitting it. The engine
//! validates every intent against the current table; rendering and
//! transport layers only build intents and read the resulting snapshot.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::Color;

/// The verb of an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Play the card at `card_index` in the submitter's hand.
    PlayCard { card_index: usize },
    /// Draw (pending penalty or a free draw), or end the turn after a free draw.
    DrawCard,
    /// Name the color for the wild card just played.
    ChooseColor { color: Color },
    /// Declare "Uno" while holding a single card.
    DeclareSpecialCall,
}

/// A complete intent.
///
/// ```
/// use uno_engine::core::{Intent, IntentKind, PlayerId};
///
/// let play = Intent::play(PlayerId::new(1), 3);
/// assert_eq!(play.kind, IntentKind::PlayCard { card_index: 3 });
///
/// let json = serde_json::to_string(&Intent::draw(PlayerId::new(0))).unwrap();
/// assert_eq!(json, r#"{"player":0,"kind":"draw_card"}"#);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    /// The submitting seat.
    pub player: PlayerId,

    /// What the seat wants to do.
    pub kind: IntentKind,
}

impl Intent {
    /// Create an intent.
    #[must_use]
    pub const fn new(player: PlayerId, kind: IntentKind) -> Self {
        Self { player, kind }
    }

    /// Play the card at `card_index`.
    #[must_use]
    pub const fn play(player: PlayerId, card_index: usize) -> Self {
        Self::new(player, IntentKind::PlayCard { card_index })
    }

    /// Draw, or end the turn after a free draw.
    #[must_use]
    pub const fn draw(player: PlayerId) -> Self {
        Self::new(player, IntentKind::DrawCard)
    }

    /// Choose the color for a wild card.
    #[must_use]
    pub const fn choose_color(player: PlayerId, color: Color) -> Self {
        Self::new(player, IntentKind::ChooseColor { color })
    }

    /// Declare the special call.
    #[must_use]
    pub const fn declare(player: PlayerId) -> Self {
        Self::new(player, IntentKind::DeclareSpecialCall)
    }
}

/// An applied intent with metadata, kept for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRecord {
    /// The applied intent.
    pub intent: Intent,

    /// Turn number when the intent was applied.
    pub turn: u32,

    /// Position in the game's intent log.
    pub sequence: u32,
}

impl IntentRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(intent: Intent, turn: u32, sequence: u32) -> Self {
        Self {
            intent,
            turn,
            sequence,
        }
    }
}

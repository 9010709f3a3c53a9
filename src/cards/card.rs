//! Card values.
//!
//! A `Card` is an immutable `Copy` value. Wild-family cards carry
//! `Color::Wild`; the color chosen when one is played lives on the table
//! as the active color and never on the card itself.

use serde::{Deserialize, Serialize};

/// Card color. `Wild` is only printed on wild-family cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Wild,
}

impl Color {
    /// Colors a player may name for a wild card, in tie-break order.
    pub const CHOOSABLE: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// Check if this is the wild pseudo-color.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Green => "Green",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Wild => "Wild",
        };
        f.write_str(name)
    }
}

/// Card rank: a numeral 0-9 or an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Rank {
    /// Colored actions, in deck order.
    pub const ACTIONS: [Rank; 3] = [Rank::Skip, Rank::Reverse, Rank::DrawTwo];

    /// Check if this is a wild-family rank.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Rank::Wild | Rank::WildDrawFour)
    }

    /// Check if this is a colored action (Skip, Reverse, DrawTwo).
    #[must_use]
    pub const fn is_action(self) -> bool {
        matches!(self, Rank::Skip | Rank::Reverse | Rank::DrawTwo)
    }

    /// The numeral value, if any.
    #[must_use]
    pub const fn number(self) -> Option<u8> {
        match self {
            Rank::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Cards added to the pending draw when this rank is played.
    #[must_use]
    pub const fn draw_penalty(self) -> u32 {
        match self {
            Rank::DrawTwo => 2,
            Rank::WildDrawFour => 4,
            _ => 0,
        }
    }

    /// Score value when left in a losing hand.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Rank::Number(n) => n as u32,
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => 20,
            Rank::Wild | Rank::WildDrawFour => 50,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Number(n) => write!(f, "{}", n),
            Rank::Skip => f.write_str("Skip"),
            Rank::Reverse => f.write_str("Reverse"),
            Rank::DrawTwo => f.write_str("Draw Two"),
            Rank::Wild => f.write_str("Wild"),
            Rank::WildDrawFour => f.write_str("Wild Draw Four"),
        }
    }
}

/// A single card.
///
/// ```
/// use uno_engine::cards::{Card, Color, Rank};
///
/// let seven = Card::number(Color::Red, 7);
/// assert_eq!(seven.to_string(), "Red 7");
/// assert!(!seven.is_wild());
///
/// let plus_four = Card::wild_draw_four();
/// assert_eq!(plus_four.color, Color::Wild);
/// assert_eq!(plus_four.rank.draw_penalty(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    /// Create a card. No validation; see `deck::validate_composition`.
    #[must_use]
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    /// A numeral card.
    #[must_use]
    pub const fn number(color: Color, value: u8) -> Self {
        Self::new(color, Rank::Number(value))
    }

    /// A Skip card.
    #[must_use]
    pub const fn skip(color: Color) -> Self {
        Self::new(color, Rank::Skip)
    }

    /// A Reverse card.
    #[must_use]
    pub const fn reverse(color: Color) -> Self {
        Self::new(color, Rank::Reverse)
    }

    /// A Draw Two card.
    #[must_use]
    pub const fn draw_two(color: Color) -> Self {
        Self::new(color, Rank::DrawTwo)
    }

    /// A plain Wild card.
    #[must_use]
    pub const fn wild() -> Self {
        Self::new(Color::Wild, Rank::Wild)
    }

    /// A Wild Draw Four card.
    #[must_use]
    pub const fn wild_draw_four() -> Self {
        Self::new(Color::Wild, Rank::WildDrawFour)
    }

    /// Check if this is a wild-family card.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        self.rank.is_wild()
    }

    /// Check if this is a numeral card.
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self.rank, Rank::Number(_))
    }

    /// Check if this card adds to the pending draw.
    #[must_use]
    pub const fn is_draw_card(self) -> bool {
        self.rank.draw_penalty() > 0
    }

    /// Score value when left in a losing hand.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.rank.points()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wild() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{} {}", self.color, self.rank)
        }
    }
}

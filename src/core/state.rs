//! Table state: the single authoritative value for one game.
//!
//! ## TableState
//!
//! Everything the engine needs to validate and apply intents:
//! - Rule configuration and deterministic RNG
//! - Draw and discard piles, hands
//! - Current seat, direction, pending draw, active color
//! - Phase, per-seat vulnerability flags, intent history
//!
//! The value is only mutated through `Engine`, which checks after every
//! applied intent that no card was created or destroyed.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::IntentRecord;
use super::config::RuleConfig;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Card, Color};
use crate::rules::{legality, turn};
use crate::zones::Piles;

/// A player's hand. Order is irrelevant to the rules; indices address
/// cards for `PlayCard` and drawn cards are appended.
pub type Hand = SmallVec<[Card; 8]>;

/// Direction of play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Seat indices increase (+1).
    Clockwise,
    /// Seat indices decrease (-1).
    CounterClockwise,
}

impl Direction {
    /// Signed seat step.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Clockwise => f.write_str("clockwise"),
            Direction::CounterClockwise => f.write_str("counter-clockwise"),
        }
    }
}

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The current seat may play or draw; others may jump in.
    AwaitingMove,
    /// `player` played a wild card and must name a color.
    AwaitingColorChoice { player: PlayerId },
    /// `player` is down to one card without calling; the turn has passed.
    AwaitingSpecialCallWindow { player: PlayerId },
    /// `winner` emptied their hand.
    Terminal { winner: PlayerId },
}

impl Phase {
    /// Check if the game is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Terminal { .. })
    }

    /// The seat this phase is waiting on or names as winner.
    #[must_use]
    pub const fn player(self) -> Option<PlayerId> {
        match self {
            Phase::AwaitingMove => None,
            Phase::AwaitingColorChoice { player }
            | Phase::AwaitingSpecialCallWindow { player }
            | Phase::Terminal { winner: player } => Some(player),
        }
    }
}

/// Authoritative state of one table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableState {
    pub(crate) rules: RuleConfig,
    pub(crate) piles: Piles,
    pub(crate) hands: PlayerMap<Hand>,
    pub(crate) current: PlayerId,
    pub(crate) direction: Direction,
    pub(crate) pending_draw: u32,
    pub(crate) active_color: Color,
    pub(crate) phase: Phase,
    pub(crate) vulnerable: PlayerMap<bool>,
    /// Card taken by a human free draw this turn; only it may be played.
    pub(crate) drawn_this_turn: Option<Card>,
    pub(crate) turn_number: u32,
    pub(crate) winner_score: Option<u32>,
    pub(crate) history: Vector<IntentRecord>,
    pub(crate) rng: GameRng,
}

impl TableState {
    /// Assemble a table at the start of a game.
    pub(crate) fn new(rules: RuleConfig, piles: Piles, hands: PlayerMap<Hand>, rng: GameRng) -> Self {
        let player_count = rules.player_count;
        let active_color = piles.top().map_or(Color::Red, |c| c.color);

        Self {
            rules,
            piles,
            hands,
            current: PlayerId::new(0),
            direction: Direction::Clockwise,
            pending_draw: 0,
            active_color,
            phase: Phase::AwaitingMove,
            vulnerable: PlayerMap::with_value(player_count, false),
            drawn_this_turn: None,
            turn_number: 1,
            winner_score: None,
            history: Vector::new(),
            rng,
        }
    }

    /// Rule configuration.
    #[must_use]
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// Iterate over all seats.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// A seat's hand. Empty for unknown seats.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        self.hands.get(player).map_or(&[], |h| h.as_slice())
    }

    /// Hand sizes in seat order.
    #[must_use]
    pub fn hand_sizes(&self) -> Vec<usize> {
        self.hands.values().map(|h| h.len()).collect()
    }

    /// Draw and discard piles.
    #[must_use]
    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    /// The active (top) discard card.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.piles.top()
    }

    /// Active color; differs from the top card's printed color after a wild.
    #[must_use]
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Direction of play.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Cards the current seat owes.
    #[must_use]
    pub fn pending_draw(&self) -> u32 {
        self.pending_draw
    }

    /// Turn phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if a seat holds one card without having called.
    #[must_use]
    pub fn is_vulnerable(&self, player: PlayerId) -> bool {
        self.vulnerable.get(player).copied().unwrap_or(false)
    }

    /// Card drawn by a human free draw this turn, if any.
    #[must_use]
    pub fn drawn_this_turn(&self) -> Option<Card> {
        self.drawn_this_turn
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Terminal { winner } => Some(winner),
            _ => None,
        }
    }

    /// Points scored by the winner, once the game is over.
    #[must_use]
    pub fn winner_score(&self) -> Option<u32> {
        self.winner_score
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Every intent applied so far.
    #[must_use]
    pub fn history(&self) -> &Vector<IntentRecord> {
        &self.history
    }

    /// Seat reached from `player` in the current direction, skipping `skip_count` seats.
    #[must_use]
    pub fn seat_after(&self, player: PlayerId, skip_count: usize) -> PlayerId {
        PlayerId::from_index(turn::next_seat(
            player.index(),
            self.direction,
            skip_count,
            self.player_count(),
        ))
    }

    /// The seat that plays after the current one.
    #[must_use]
    pub fn next_player(&self) -> PlayerId {
        self.seat_after(self.current, 0)
    }

    /// Indices of cards in `player`'s hand that are legal on their turn.
    #[must_use]
    pub fn playable_indices(&self, player: PlayerId) -> Vec<usize> {
        self.hand(player)
            .iter()
            .enumerate()
            .filter(|&(_, &card)| legality::check_play(self, card).is_ok())
            .map(|(i, _)| i)
            .collect()
    }

    /// Cards across piles and hands. Always `DECK_SIZE`.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.len() + self.hands.values().map(|h| h.len()).sum::<usize>()
    }

    /// Every card at the table: draw pile, discard pile, then hands.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.piles
            .draw_pile()
            .iter()
            .chain(self.piles.discard_pile())
            .chain(self.hands.values().flat_map(|h| h.iter()))
            .copied()
    }

    /// Sum of card points left in every hand except `winner`'s.
    #[must_use]
    pub fn score_for(&self, winner: PlayerId) -> u32 {
        self.hands
            .iter()
            .filter(|(p, _)| *p != winner)
            .flat_map(|(_, hand)| hand.iter())
            .map(|card| card.points())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    fn table(hands: Vec<Vec<Card>>, top: Card) -> TableState {
        let rules = RuleConfig::all_human(hands.len());
        let piles = Piles::from_parts(vec![Card::number(Color::Blue, 1)], vec![top]);
        let hands = PlayerMap::new(hands.len(), |p| hands[p.index()].iter().copied().collect());
        TableState::new(rules, piles, hands, GameRng::new(1))
    }

    #[test]
    fn test_new_table() {
        let state = table(vec![vec![], vec![], vec![]], Card::number(Color::Green, 4));

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.active_color(), Color::Green);
        assert_eq!(state.current_player(), PlayerId::new(0));
        assert_eq!(state.direction(), Direction::Clockwise);
        assert_eq!(state.phase(), Phase::AwaitingMove);
        assert_eq!(state.turn_number(), 1);
        assert_eq!(state.card_count(), 2);
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::Clockwise.step(), 1);
        assert_eq!(Direction::Clockwise.reversed(), Direction::CounterClockwise);
        assert_eq!(Direction::CounterClockwise.step(), -1);
    }

    #[test]
    fn test_seat_after_wraps() {
        let mut state = table(vec![vec![]; 4], Card::number(Color::Red, 1));
        state.current = PlayerId::new(3);
        assert_eq!(state.next_player(), PlayerId::new(0));

        state.direction = Direction::CounterClockwise;
        state.current = PlayerId::new(0);
        assert_eq!(state.next_player(), PlayerId::new(3));
        assert_eq!(state.seat_after(PlayerId::new(0), 1), PlayerId::new(2));
    }

    #[test]
    fn test_playable_indices() {
        let hand = vec![
            Card::number(Color::Red, 9),
            Card::number(Color::Blue, 3),
            Card::wild(),
            Card::new(Color::Yellow, Rank::Number(5)),
        ];
        let state = table(vec![hand, vec![]], Card::number(Color::Red, 5));

        assert_eq!(state.playable_indices(PlayerId::new(0)), vec![0, 2, 3]);
    }

    #[test]
    fn test_score_for_winner() {
        let state = table(
            vec![
                vec![],
                vec![Card::number(Color::Red, 7), Card::skip(Color::Red)],
                vec![Card::wild()],
            ],
            Card::number(Color::Red, 5),
        );

        assert_eq!(state.score_for(PlayerId::new(0)), 77);
    }

    #[test]
    fn test_unknown_seat_has_empty_hand() {
        let state = table(vec![vec![Card::wild()], vec![]], Card::number(Color::Red, 1));
        assert!(state.hand(PlayerId::new(9)).is_empty());
        assert!(!state.is_vulnerable(PlayerId::new(9)));
    }
}

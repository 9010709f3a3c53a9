//! Table construction: shuffle, deal, and flip the starting card.
//!
//! `TableSetup` is a builder in the style of the game builders elsewhere in
//! the crate. With no overrides it performs a normal seeded deal. Tests and
//! puzzle tables can pin hands, the top card, and the next draws; pinned
//! cards are taken out of one standard deck, so every table still holds
//! exactly 108 cards.

use thiserror::Error;
use tracing::debug;

use crate::cards::deck::{standard_deck, take_card, validate_composition, DeckError};
use crate::cards::{Card, Color};
use crate::core::config::{ConfigError, RuleConfig};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::{Direction, Hand, TableState};
use crate::zones::Piles;

/// Why a table could not be built or restored.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("{0} is not seated at this table")]
    UnknownSeat(PlayerId),
    #[error("not enough cards left to finish the deal")]
    NotEnoughCards,
    #[error("invalid checkpoint: {0}")]
    Checkpoint(#[from] bincode::Error),
}

/// Builder for the starting `TableState`.
#[derive(Clone, Debug)]
pub struct TableSetup {
    rules: RuleConfig,
    hands: Vec<(PlayerId, Vec<Card>)>,
    top_card: Option<Card>,
    active_color: Option<Color>,
    next_draws: Vec<Card>,
    rest_in_discard: bool,
    current: PlayerId,
    direction: Direction,
}

impl TableSetup {
    /// Start from a rule configuration.
    #[must_use]
    pub fn new(rules: RuleConfig) -> Self {
        Self {
            rules,
            hands: Vec::new(),
            top_card: None,
            active_color: None,
            next_draws: Vec::new(),
            rest_in_discard: false,
            current: PlayerId::new(0),
            direction: Direction::Clockwise,
        }
    }

    /// Give `player` exactly these cards instead of a dealt hand.
    #[must_use]
    pub fn hand(mut self, player: PlayerId, cards: Vec<Card>) -> Self {
        self.hands.retain(|(p, _)| *p != player);
        self.hands.push((player, cards));
        self
    }

    /// Start with `card` on the discard pile instead of flipping one.
    #[must_use]
    pub fn top_card(mut self, card: Card) -> Self {
        self.top_card = Some(card);
        self
    }

    /// Active color at the start. Defaults to the top card's color, or Red
    /// when the top card is wild.
    #[must_use]
    pub fn active_color(mut self, color: Color) -> Self {
        self.active_color = Some(color);
        self
    }

    /// Cards drawn next, first element first.
    #[must_use]
    pub fn next_draws(mut self, cards: Vec<Card>) -> Self {
        self.next_draws = cards;
        self
    }

    /// Put every undealt card under the top card on the discard pile, so the
    /// draw pile holds only `next_draws`.
    #[must_use]
    pub fn rest_in_discard(mut self) -> Self {
        self.rest_in_discard = true;
        self
    }

    /// Seat that takes the first turn.
    #[must_use]
    pub fn current(mut self, player: PlayerId) -> Self {
        self.current = player;
        self
    }

    /// Starting direction of play.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Build the table.
    pub fn build(self) -> Result<TableState, SetupError> {
        self.rules.validate()?;
        let player_count = self.rules.player_count;

        let mut deck = standard_deck();
        validate_composition(&deck)?;

        if self.current.index() >= player_count {
            return Err(SetupError::UnknownSeat(self.current));
        }

        // Pinned cards leave the deck before the shuffle.
        let mut pinned: Vec<Option<Hand>> = vec![None; player_count];
        for (player, cards) in &self.hands {
            let slot = pinned
                .get_mut(player.index())
                .ok_or(SetupError::UnknownSeat(*player))?;
            let mut hand = Hand::new();
            for &card in cards {
                hand.push(take_card(&mut deck, card)?);
            }
            *slot = Some(hand);
        }
        let top = self.top_card.map(|card| take_card(&mut deck, card)).transpose()?;
        let mut next_draws = Vec::with_capacity(self.next_draws.len());
        for &card in &self.next_draws {
            next_draws.push(take_card(&mut deck, card)?);
        }

        let rng = GameRng::new(self.rules.seed);
        rng.for_context("shuffle").shuffle(&mut deck);

        let deal_to: Vec<usize> = (0..player_count).filter(|&i| pinned[i].is_none()).collect();
        let mut hands: Vec<Hand> = pinned.into_iter().map(Option::unwrap_or_default).collect();
        for _ in 0..self.rules.hand_size {
            for &seat in &deal_to {
                let card = deck.pop().ok_or(SetupError::NotEnoughCards)?;
                hands[seat].push(card);
            }
        }

        let top = match top {
            Some(card) => card,
            None => flip_starting_card(&mut deck)?,
        };
        let active_color = self
            .active_color
            .filter(|color| !color.is_wild())
            .unwrap_or(if top.is_wild() { Color::Red } else { top.color });

        let (mut draw, discard) = if self.rest_in_discard {
            deck.push(top);
            (Vec::new(), deck)
        } else {
            (deck, vec![top])
        };
        draw.extend(next_draws.into_iter().rev());

        debug!(
            seed = self.rules.seed,
            players = player_count,
            top = %top,
            "dealt table"
        );

        let hands = PlayerMap::new(player_count, |p| hands[p.index()].clone());
        let mut state = TableState::new(self.rules, Piles::from_parts(draw, discard), hands, rng);
        state.active_color = active_color;
        state.current = self.current;
        state.direction = self.direction;
        Ok(state)
    }
}

/// Flip cards until a number card comes up. Wild and action cards go to
/// the bottom of the draw pile.
fn flip_starting_card(deck: &mut Vec<Card>) -> Result<Card, SetupError> {
    if !deck.iter().any(|card| card.is_number()) {
        return Err(SetupError::NotEnoughCards);
    }
    loop {
        let card = deck.pop().ok_or(SetupError::NotEnoughCards)?;
        if card.is_number() {
            return Ok(card);
        }
        deck.insert(0, card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DECK_SIZE;
    use crate::core::config::SeatKind;

    #[test]
    fn test_default_deal() {
        let state = TableSetup::new(RuleConfig::new(2).with_seed(42)).build().unwrap();

        assert_eq!(state.hand_sizes(), vec![7, 7]);
        assert_eq!(state.piles().discard_pile().len(), 1);
        assert_eq!(state.piles().draw_pile().len(), DECK_SIZE - 15);
        assert_eq!(state.card_count(), DECK_SIZE);

        let top = state.top_card().unwrap();
        assert!(top.is_number());
        assert_eq!(state.active_color(), top.color);
        assert_eq!(state.current_player(), PlayerId::new(0));
    }

    #[test]
    fn test_deal_is_deterministic() {
        let a = TableSetup::new(RuleConfig::new(4).with_seed(7)).build().unwrap();
        let b = TableSetup::new(RuleConfig::new(4).with_seed(7)).build().unwrap();
        let c = TableSetup::new(RuleConfig::new(4).with_seed(8)).build().unwrap();

        assert_eq!(a.hand(PlayerId::new(2)), b.hand(PlayerId::new(2)));
        assert_eq!(a.piles(), b.piles());
        assert_ne!(a.piles(), c.piles());
    }

    #[test]
    fn test_starting_card_is_number_for_many_seeds() {
        for seed in 0..200 {
            let state = TableSetup::new(RuleConfig::new(3).with_seed(seed)).build().unwrap();
            assert!(state.top_card().unwrap().is_number(), "seed {seed}");
        }
    }

    #[test]
    fn test_pinned_cards() {
        let hand = vec![Card::number(Color::Red, 0), Card::wild()];
        let state = TableSetup::new(RuleConfig::all_human(3))
            .hand(PlayerId::new(1), hand.clone())
            .top_card(Card::skip(Color::Blue))
            .next_draws(vec![Card::number(Color::Green, 3), Card::number(Color::Green, 4)])
            .current(PlayerId::new(2))
            .build()
            .unwrap();

        assert_eq!(state.hand(PlayerId::new(1)), hand.as_slice());
        assert_eq!(state.hand_sizes(), vec![7, 2, 7]);
        assert_eq!(state.top_card(), Some(Card::skip(Color::Blue)));
        assert_eq!(state.active_color(), Color::Blue);
        assert_eq!(state.current_player(), PlayerId::new(2));
        assert_eq!(
            state.piles().draw_pile().last(),
            Some(&Card::number(Color::Green, 3))
        );
        assert_eq!(state.card_count(), DECK_SIZE);
    }

    #[test]
    fn test_rest_in_discard() {
        let state = TableSetup::new(RuleConfig::all_human(2))
            .hand(PlayerId::new(0), vec![Card::number(Color::Red, 1)])
            .hand(PlayerId::new(1), vec![Card::number(Color::Red, 2)])
            .top_card(Card::number(Color::Red, 5))
            .next_draws(vec![Card::wild()])
            .rest_in_discard()
            .build()
            .unwrap();

        assert_eq!(state.piles().draw_pile(), &[Card::wild()]);
        assert_eq!(state.piles().discard_pile().len(), DECK_SIZE - 3);
        assert_eq!(state.top_card(), Some(Card::number(Color::Red, 5)));
    }

    #[test]
    fn test_wild_top_card_defaults_to_red() {
        let state = TableSetup::new(RuleConfig::all_human(2))
            .top_card(Card::wild())
            .build()
            .unwrap();
        assert_eq!(state.active_color(), Color::Red);

        let state = TableSetup::new(RuleConfig::all_human(2))
            .top_card(Card::wild())
            .active_color(Color::Yellow)
            .build()
            .unwrap();
        assert_eq!(state.active_color(), Color::Yellow);
    }

    #[test]
    fn test_setup_errors() {
        let err = TableSetup::new(RuleConfig::new(5)).build().unwrap_err();
        assert!(matches!(err, SetupError::Config(ConfigError::PlayerCount(5))));

        let err = TableSetup::new(RuleConfig::new(2).with_seats(vec![SeatKind::Human]))
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::Config(ConfigError::SeatCount { .. })));

        let err = TableSetup::new(RuleConfig::new(2))
            .hand(PlayerId::new(3), vec![])
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::UnknownSeat(p) if p == PlayerId::new(3)));

        let zeros = vec![Card::number(Color::Red, 0), Card::number(Color::Red, 0)];
        let err = TableSetup::new(RuleConfig::new(2))
            .hand(PlayerId::new(0), zeros)
            .build()
            .unwrap_err();
        assert!(matches!(err, SetupError::Deck(DeckError::Exhausted(_))));
    }
}

//! Uniformly random legal play.

use super::{legal_cards, OpponentStrategy, StrategyChoice};
use crate::cards::Card;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::TableState;

/// Picks uniformly among legal cards; draws only when nothing is legal.
///
/// A baseline for tests and benchmarks. Seeded, so games stay reproducible.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl OpponentStrategy for RandomStrategy {
    fn choose_action(&mut self, hand: &[Card], state: &TableState, _me: PlayerId) -> StrategyChoice {
        let legal = legal_cards(hand, state);
        self.rng
            .choose(&legal)
            .map_or(StrategyChoice::Draw, |&index| StrategyChoice::Play(index))
    }
}

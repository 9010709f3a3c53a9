//! Reference priority policy.
//!
//! Considers only legal cards, in this order:
//! 1. Next seat close to winning (2 cards or fewer): Wild Draw Four,
//!    Draw Two, Skip
//! 2. Reverse, Skip, Draw Two
//! 3. Highest number of 5 or more
//! 4. Highest number
//! 5. Plain Wild
//! 6. Any wild
//! 7. Draw

use super::{legal_cards, OpponentStrategy, StrategyChoice};
use crate::cards::{Card, Rank};
use crate::core::player::PlayerId;
use crate::core::state::TableState;

/// Hand size at which the next seat counts as a threat.
const THREAT_HAND_SIZE: usize = 2;

/// Deterministic priority-ordered strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriorityStrategy;

impl PriorityStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn first_of(hand: &[Card], legal: &[usize], rank: Rank) -> Option<usize> {
    legal.iter().copied().find(|&i| hand[i].rank == rank)
}

fn highest_number(hand: &[Card], legal: &[usize], at_least: u8) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for &i in legal {
        if let Some(value) = hand[i].rank.number() {
            if value >= at_least && best.map_or(true, |(_, b)| value > b) {
                best = Some((i, value));
            }
        }
    }
    best.map(|(i, _)| i)
}

impl OpponentStrategy for PriorityStrategy {
    fn choose_action(&mut self, hand: &[Card], state: &TableState, me: PlayerId) -> StrategyChoice {
        let legal = legal_cards(hand, state);
        if legal.is_empty() {
            return StrategyChoice::Draw;
        }

        let next = state.seat_after(me, 0);
        let threatened = state.hand(next).len() <= THREAT_HAND_SIZE;

        let pick = if threatened {
            [Rank::WildDrawFour, Rank::DrawTwo, Rank::Skip]
                .into_iter()
                .find_map(|rank| first_of(hand, &legal, rank))
        } else {
            None
        };

        pick.or_else(|| {
            [Rank::Reverse, Rank::Skip, Rank::DrawTwo]
                .into_iter()
                .find_map(|rank| first_of(hand, &legal, rank))
        })
        .or_else(|| highest_number(hand, &legal, 5))
        .or_else(|| highest_number(hand, &legal, 0))
        .or_else(|| first_of(hand, &legal, Rank::Wild))
        .or_else(|| legal.iter().copied().find(|&i| hand[i].is_wild()))
        .map_or(StrategyChoice::Draw, StrategyChoice::Play)
    }
}

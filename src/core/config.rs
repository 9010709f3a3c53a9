//! Table rule configuration.
//!
//! Rule variants are explicit options rather than forked code paths:
//! - `player_count` and `seats`: who sits at the table
//! - `jump_in_enabled`: out-of-turn plays of an identical card
//! - `draw_stacking_enabled`: draw cards compound the pending draw
//! - `special_call_penalty`: cards drawn for a missed "Uno" call
//!
//! Configs can be built in code or loaded from JSON; missing JSON fields
//! take their defaults. Missing `seats` follow `player_count`: a human at
//! seat 0 and computers elsewhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlayerId;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Cards that may be dealt in total. Leaves more cards in the draw pile
/// than there are non-number cards, so a number card can always be flipped.
pub const MAX_DEALT_CARDS: usize = 75;

/// Who controls a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    /// Intents arrive from outside the engine.
    Human,
    /// The engine's opponent strategy acts for this seat.
    Computer,
}

/// Invalid rule configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player count {0} outside supported range 2..=4")]
    PlayerCount(usize),
    #[error("expected {expected} seat kinds, got {actual}")]
    SeatCount { expected: usize, actual: usize },
    #[error("hand size {hand_size} is invalid for {player_count} players")]
    HandSize { hand_size: usize, player_count: usize },
    #[error("invalid rule config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete rule configuration for one table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Number of seats (2-4).
    pub player_count: usize,

    /// Controller of each seat, indexed by seat.
    #[serde(default)]
    pub seats: Vec<SeatKind>,

    /// Cards dealt to each seat.
    pub hand_size: usize,

    /// Allow out-of-turn plays of a card identical to the top card.
    pub jump_in_enabled: bool,

    /// Allow draw cards to be played onto an unresolved pending draw.
    pub draw_stacking_enabled: bool,

    /// Cards drawn by a player who misses the special call.
    pub special_call_penalty: u32,

    /// Let `Engine::submit` continue with computer turns after a human intent.
    pub auto_play_computers: bool,

    /// Seed for the deal and every reshuffle.
    pub seed: u64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

impl RuleConfig {
    /// Create a config with one human at seat 0 and computers elsewhere.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        let seats = (0..player_count)
            .map(|i| if i == 0 { SeatKind::Human } else { SeatKind::Computer })
            .collect();

        Self {
            player_count,
            seats,
            hand_size: 7,
            jump_in_enabled: true,
            draw_stacking_enabled: true,
            special_call_penalty: 2,
            auto_play_computers: true,
            seed: 0,
        }
    }

    /// Create a config where every seat is human (hot-seat or networked play).
    #[must_use]
    pub fn all_human(player_count: usize) -> Self {
        Self::new(player_count).with_seats(vec![SeatKind::Human; player_count])
    }

    /// Create a config where every seat is a computer.
    #[must_use]
    pub fn all_computer(player_count: usize) -> Self {
        Self::new(player_count).with_seats(vec![SeatKind::Computer; player_count])
    }

    /// Load from JSON, then validate.
    ///
    /// ```
    /// use uno_engine::core::RuleConfig;
    ///
    /// let config = RuleConfig::from_json(r#"{"player_count": 3, "seats": ["human", "computer", "computer"], "seed": 9}"#).unwrap();
    /// assert_eq!(config.player_count, 3);
    /// assert_eq!(config.hand_size, 7);
    /// assert!(config.draw_stacking_enabled);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.seats.is_empty() {
            config.seats = Self::new(config.player_count).seats;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.seats.len() != self.player_count {
            return Err(ConfigError::SeatCount {
                expected: self.player_count,
                actual: self.seats.len(),
            });
        }
        if self.hand_size == 0 || self.hand_size * self.player_count > MAX_DEALT_CARDS {
            return Err(ConfigError::HandSize {
                hand_size: self.hand_size,
                player_count: self.player_count,
            });
        }
        Ok(())
    }

    /// Controller of a seat. Unknown seats are treated as human.
    #[must_use]
    pub fn seat(&self, player: PlayerId) -> SeatKind {
        self.seats.get(player.index()).copied().unwrap_or(SeatKind::Human)
    }

    /// Check whether the engine acts for a seat.
    #[must_use]
    pub fn is_computer(&self, player: PlayerId) -> bool {
        self.seat(player) == SeatKind::Computer
    }

    /// Replace all seat kinds.
    #[must_use]
    pub fn with_seats(mut self, seats: Vec<SeatKind>) -> Self {
        self.seats = seats;
        self
    }

    /// Set the number of cards dealt to each seat.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Enable or disable jump-in plays.
    #[must_use]
    pub fn with_jump_in(mut self, enabled: bool) -> Self {
        self.jump_in_enabled = enabled;
        self
    }

    /// Enable or disable draw stacking.
    #[must_use]
    pub fn with_draw_stacking(mut self, enabled: bool) -> Self {
        self.draw_stacking_enabled = enabled;
        self
    }

    /// Set the missed-call penalty.
    #[must_use]
    pub fn with_call_penalty(mut self, cards: u32) -> Self {
        self.special_call_penalty = cards;
        self
    }

    /// Enable or disable automatic computer turns after `submit`.
    #[must_use]
    pub fn with_auto_play(mut self, enabled: bool) -> Self {
        self.auto_play_computers = enabled;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuleConfig::default();

        assert_eq!(config.player_count, 2);
        assert_eq!(config.seats, vec![SeatKind::Human, SeatKind::Computer]);
        assert_eq!(config.hand_size, 7);
        assert!(config.jump_in_enabled);
        assert!(config.draw_stacking_enabled);
        assert_eq!(config.special_call_penalty, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RuleConfig::all_human(4)
            .with_hand_size(5)
            .with_jump_in(false)
            .with_draw_stacking(false)
            .with_call_penalty(4)
            .with_seed(77);

        assert_eq!(config.seats.len(), 4);
        assert!(!config.is_computer(PlayerId::new(3)));
        assert_eq!(config.hand_size, 5);
        assert!(!config.jump_in_enabled);
        assert!(!config.draw_stacking_enabled);
        assert_eq!(config.special_call_penalty, 4);
        assert_eq!(config.seed, 77);
    }

    #[test]
    fn test_rejects_player_count() {
        assert!(matches!(
            RuleConfig::all_human(1).validate(),
            Err(ConfigError::PlayerCount(1))
        ));
        assert!(matches!(
            RuleConfig::all_human(5).validate(),
            Err(ConfigError::PlayerCount(5))
        ));
    }

    #[test]
    fn test_rejects_seat_mismatch() {
        let config = RuleConfig::new(3).with_seats(vec![SeatKind::Human]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SeatCount { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_rejects_oversized_deal() {
        assert!(RuleConfig::new(4).with_hand_size(18).validate().is_ok());
        assert!(matches!(
            RuleConfig::new(4).with_hand_size(19).validate(),
            Err(ConfigError::HandSize { .. })
        ));
        assert!(RuleConfig::new(2).with_hand_size(0).validate().is_err());
    }

    #[test]
    fn test_from_json_defaults() {
        let config = RuleConfig::from_json(r#"{"seed": 12}"#).unwrap();
        assert_eq!(config.seed, 12);
        assert_eq!(config.player_count, 2);
        assert_eq!(config.seats.len(), 2);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(RuleConfig::from_json("{not json"), Err(ConfigError::Json(_))));
        assert!(matches!(
            RuleConfig::from_json(r#"{"player_count": 3, "seats": ["human"]}"#),
            Err(ConfigError::SeatCount { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_from_json_seats_follow_player_count() {
        let config = RuleConfig::from_json(r#"{"player_count": 3}"#).unwrap();
        assert_eq!(
            config.seats,
            vec![SeatKind::Human, SeatKind::Computer, SeatKind::Computer]
        );

        let config = RuleConfig::from_json(r#"{"player_count": 4, "seats": []}"#).unwrap();
        assert_eq!(config.seats.len(), 4);
    }
}

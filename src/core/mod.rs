//! Core engine types: seats, intents, errors, configuration, state, RNG.
//!
//! This module holds the values that cross the engine boundary.
//! Rules live in `rules`; strategies in `opponents`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use action::{Intent, IntentKind, IntentRecord};
pub use config::{ConfigError, RuleConfig, SeatKind, MAX_PLAYERS, MIN_PLAYERS};
pub use error::EngineError;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use snapshot::{HandView, TableSnapshot};
pub use state::{Direction, Hand, Phase, TableState};

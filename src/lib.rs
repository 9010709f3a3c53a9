//! # uno-engine
//!
//! An authoritative rules engine for Uno-style card games, for 2-4 players
//! mixing humans and computer opponents.
//!
//! ## Design Principles
//!
//! 1. **One explicit table value**: all game state lives in a `TableState`
//!    owned by an `Engine`. No globals; a server hosts one engine per game.
//!
//! 2. **Intents in, snapshots out**: callers submit `Intent`s and get back
//!    an `Outcome` with a per-viewer `TableSnapshot` and readable events.
//!    Hidden hands never leave the engine.
//!
//! 3. **Configuration over forks**: rule variants (player count, jump-in,
//!    draw stacking, call penalty) are `RuleConfig` options.
//!
//! ## Modules
//!
//! - `core`: seats, intents, errors, configuration, table state, RNG
//! - `cards`: card values and the 108-card deck
//! - `zones`: draw and discard piles
//! - `rules`: setup, legality, and the engine state machine
//! - `events`: what applied intents did
//! - `opponents`: strategies for computer seats
//! - `lobby`: a registry hosting many games
//!
//! ```
//! use uno_engine::{Engine, Intent, PlayerId, RuleConfig};
//!
//! let mut engine = Engine::new(RuleConfig::new(2).with_seed(3)).unwrap();
//! let me = PlayerId::new(0);
//!
//! let intent = engine.legal_intents(me)[0];
//! let outcome = engine.submit(intent);
//! assert!(outcome.ok);
//! assert!(outcome.snapshot.own_hand().is_some());
//! ```

pub mod cards;
pub mod core;
pub mod events;
pub mod lobby;
pub mod opponents;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Direction, EngineError, GameRng, HandView, Intent, IntentKind, Phase, PlayerId,
    RuleConfig, SeatKind, TableSnapshot, TableState,
};

pub use crate::cards::{Card, Color, Rank, DECK_SIZE};

pub use crate::events::GameEvent;

pub use crate::rules::{next_seat, Engine, Outcome, SetupError, TableSetup};

pub use crate::opponents::{OpponentStrategy, PriorityStrategy, RandomStrategy, StrategyChoice};

pub use crate::lobby::{GameId, GameRegistry, RegistryError};

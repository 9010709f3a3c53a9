//! Rules of play.
//!
//! - `setup`: shuffle, deal, and flip the starting card
//! - `legality`: which cards may be played, in turn or by jumping in
//! - `turn`: seat arithmetic
//! - `engine`: the state machine that validates and applies intents
//!
//! Legality and seat arithmetic are free functions of the table so
//! opponent strategies and clients can use them without an `Engine`.

pub mod engine;
pub mod legality;
pub mod outcome;
pub mod setup;
pub mod turn;

pub use engine::Engine;
pub use legality::{can_jump_in, can_play, check_play, matches_active};
pub use outcome::Outcome;
pub use setup::{SetupError, TableSetup};
pub use turn::next_seat;

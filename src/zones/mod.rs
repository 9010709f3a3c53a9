//! Shared card zones.
//!
//! Hands live on the table state; this module owns the two shared piles.
//!
//! ## Key Types
//!
//! - `Piles`: draw pile and discard pile with reshuffle
//! - `Drawn`: a drawn card plus reshuffle bookkeeping

pub mod piles;

pub use piles::{Drawn, Piles};

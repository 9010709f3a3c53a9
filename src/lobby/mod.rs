//! Hosting many tables in one process.
//!
//! One authoritative `Engine` per game id, held in an explicit map.

mod registry;

pub use registry::{GameId, GameRegistry, RegistryError};

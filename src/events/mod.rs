//! Events emitted by applied intents.
//!
//! The engine returns events in the order they happened so callers can
//! animate them or log them as human-readable text.

pub mod event;

pub use event::GameEvent;

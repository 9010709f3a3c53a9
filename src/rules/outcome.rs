//! The result of submitting an intent.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::snapshot::TableSnapshot;
use crate::events::GameEvent;

/// What a caller gets back from `Engine::submit`.
///
/// A rejected intent still carries a snapshot, so a client can resync
/// after sending something stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the intent was applied.
    pub ok: bool,

    /// The table after the intent (and any computer turns it triggered).
    pub snapshot: TableSnapshot,

    /// Everything that happened, in order.
    pub events: Vec<GameEvent>,

    /// Why the intent was rejected.
    pub error: Option<EngineError>,
}

impl Outcome {
    /// An applied intent.
    #[must_use]
    pub fn success(snapshot: TableSnapshot, events: Vec<GameEvent>) -> Self {
        Self {
            ok: true,
            snapshot,
            events,
            error: None,
        }
    }

    /// A rejected intent.
    #[must_use]
    pub fn failure(snapshot: TableSnapshot, error: EngineError) -> Self {
        Self {
            ok: false,
            snapshot,
            events: Vec::new(),
            error: Some(error),
        }
    }

    /// Events rendered as human-readable lines.
    #[must_use]
    pub fn descriptions(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

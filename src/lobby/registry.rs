//! Game registry.
//!
//! Maps game ids to engines. Each engine sits behind its own mutex, so
//! intents for one game apply one at a time while different games proceed
//! in parallel. The map itself is behind a read-write lock that is held
//! only long enough to look an engine up.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, TryLockError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::action::Intent;
use crate::core::config::RuleConfig;
use crate::core::player::PlayerId;
use crate::core::snapshot::TableSnapshot;
use crate::rules::{Engine, Outcome, SetupError};

/// Identifier of a hosted game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

/// Registry failures. Intent rejections are reported in the `Outcome`.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no game with id {0}")]
    UnknownGame(GameId),
    #[error("{0} is already registered")]
    DuplicateGame(GameId),
    #[error("{0} is busy applying another intent")]
    Busy(GameId),
    #[error("a thread panicked while holding a registry lock")]
    Poisoned,
    #[error(transparent)]
    Config(#[from] SetupError),
}

type SharedEngine = Arc<Mutex<Engine>>;

/// Thread-safe map of game id to engine.
pub struct GameRegistry {
    games: RwLock<FxHashMap<GameId, SharedEngine>>,
    next_id: AtomicU64,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Deal a new game and register it under a fresh id.
    pub fn create(&self, rules: RuleConfig) -> Result<GameId, RegistryError> {
        let engine = Engine::new(rules)?;
        let id = self.fresh_id()?;
        self.insert(id, engine)?;
        Ok(id)
    }

    /// Register an existing engine under `id`.
    pub fn insert(&self, id: GameId, engine: Engine) -> Result<(), RegistryError> {
        let mut games = self.games.write().map_err(|_| RegistryError::Poisoned)?;
        if games.contains_key(&id) {
            return Err(RegistryError::DuplicateGame(id));
        }
        games.insert(id, Arc::new(Mutex::new(engine)));
        info!(game = %id, "game registered");
        Ok(())
    }

    /// Drop a game. Returns whether it existed.
    pub fn remove(&self, id: GameId) -> Result<bool, RegistryError> {
        let mut games = self.games.write().map_err(|_| RegistryError::Poisoned)?;
        let removed = games.remove(&id).is_some();
        if removed {
            info!(game = %id, "game removed");
        }
        Ok(removed)
    }

    /// Submit an intent, waiting for any intent already in flight for the
    /// same game.
    pub fn submit(&self, id: GameId, intent: Intent) -> Result<Outcome, RegistryError> {
        let game = self.game(id)?;
        let mut engine = game.lock().map_err(|_| RegistryError::Poisoned)?;
        debug!(game = %id, player = %intent.player, "submitting intent");
        Ok(engine.submit(intent))
    }

    /// Submit an intent, failing with `Busy` instead of waiting.
    pub fn try_submit(&self, id: GameId, intent: Intent) -> Result<Outcome, RegistryError> {
        let game = self.game(id)?;
        let mut engine = match game.try_lock() {
            Ok(engine) => engine,
            Err(TryLockError::WouldBlock) => return Err(RegistryError::Busy(id)),
            Err(TryLockError::Poisoned(_)) => return Err(RegistryError::Poisoned),
        };
        Ok(engine.submit(intent))
    }

    /// Current view of a game for `viewer`.
    pub fn snapshot(&self, id: GameId, viewer: Option<PlayerId>) -> Result<TableSnapshot, RegistryError> {
        self.with_game(id, |engine| engine.snapshot(viewer))
    }

    /// Run `f` with exclusive access to a game's engine.
    pub fn with_game<R>(&self, id: GameId, f: impl FnOnce(&mut Engine) -> R) -> Result<R, RegistryError> {
        let game = self.game(id)?;
        let mut engine = game.lock().map_err(|_| RegistryError::Poisoned)?;
        Ok(f(&mut engine))
    }

    /// Number of hosted games.
    pub fn len(&self) -> usize {
        self.games.read().map_or(0, |games| games.len())
    }

    /// Check if no games are hosted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of every hosted game, sorted.
    pub fn game_ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self
            .games
            .read()
            .map(|games| games.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    fn game(&self, id: GameId) -> Result<SharedEngine, RegistryError> {
        let games = self.games.read().map_err(|_| RegistryError::Poisoned)?;
        games.get(&id).cloned().ok_or(RegistryError::UnknownGame(id))
    }

    fn fresh_id(&self) -> Result<GameId, RegistryError> {
        let games = self.games.read().map_err(|_| RegistryError::Poisoned)?;
        loop {
            let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
            if !games.contains_key(&id) {
                return Ok(id);
            }
        }
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

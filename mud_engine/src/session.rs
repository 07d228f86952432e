//! Concurrent game sessions sharing one engine and one world seed.
//!
//! Each session owns a [`GameState`] behind its own mutex, so commands for a
//! single session run one at a time while different sessions proceed in
//! parallel. The registry map itself is only write-locked to add or remove
//! sessions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use log::info;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::engine::{EngineError, GameEngine};
use crate::lexicon::LexiconProvider;
use crate::loader::GameData;
use crate::outcome::{EntityRef, Response, RoomView};
use crate::save_files::{self, PersistenceError, RestoreReport, SaveDocument};
use crate::world::{GameState, WorldSeed};

pub type SessionId = Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no session with id {0}")]
    UnknownSession(SessionId),
    #[error("session lock poisoned by an earlier panic")]
    Poisoned,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("could not build session snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Client-facing view of a game after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub room: RoomView,
    pub inventory: Vec<EntityRef>,
    pub learned_words: Vec<String>,
}

impl GameSnapshot {
    /// # Errors
    /// Returns [`EngineError::NoCurrentRoom`] if the player's location is dangling.
    pub fn of(state: &GameState) -> Result<GameSnapshot, EngineError> {
        Ok(Self {
            room: RoomView::of(state.current_room()?),
            inventory: state.player.inventory.iter().map(EntityRef::of).collect(),
            learned_words: state.player.learned_words.iter().cloned().collect(),
        })
    }
}

/// What a transport sends back for one submitted line.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReply {
    pub session_id: SessionId,
    pub text: String,
    pub snapshot: serde_json::Value,
    pub rejected: bool,
}

type SharedGame = Arc<Mutex<GameState>>;

fn lock(game: &Mutex<GameState>) -> Result<MutexGuard<'_, GameState>, SessionError> {
    game.lock().map_err(|_| SessionError::Poisoned)
}

/// All live sessions plus the read-only data they are built from.
pub struct SessionRegistry {
    engine: Arc<GameEngine>,
    seed: Arc<WorldSeed>,
    lexicon: Arc<dyn LexiconProvider>,
    sessions: RwLock<HashMap<SessionId, SharedGame>>,
}

impl SessionRegistry {
    pub fn new(engine: Arc<GameEngine>, seed: Arc<WorldSeed>, lexicon: Arc<dyn LexiconProvider>) -> Self {
        Self {
            engine,
            seed,
            lexicon,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_data(data: &GameData) -> Self {
        Self::new(Arc::new(data.engine()), Arc::clone(&data.seed), data.lexicon.clone())
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn seed(&self) -> &WorldSeed {
        &self.seed
    }

    pub fn lexicon(&self) -> &dyn LexiconProvider {
        self.lexicon.as_ref()
    }

    /// Start a new game under a fresh id and return its opening description.
    ///
    /// # Errors
    /// Fails if the seed's start room cannot be described or the lock is poisoned.
    pub fn create_session(&self) -> Result<SessionReply, SessionError> {
        let id = Uuid::new_v4();
        let game = self.get_or_create(id)?;
        let state = lock(&game)?;
        let response = self.engine.describe(&state)?;
        Self::reply(id, &state, &response)
    }

    /// The game for `id`, creating it from the seed if it does not exist yet.
    /// Concurrent calls with the same id all receive the same game.
    ///
    /// # Errors
    /// Returns [`SessionError::Poisoned`] if the registry lock is poisoned.
    pub fn get_or_create(&self, id: SessionId) -> Result<SharedGame, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Poisoned)?;
        let game = sessions.entry(id).or_insert_with(|| {
            info!("session {id} created");
            Arc::new(Mutex::new(self.seed.new_game()))
        });
        Ok(Arc::clone(game))
    }

    /// The game for an existing session.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownSession`] if no such session exists.
    pub fn session(&self, id: SessionId) -> Result<SharedGame, SessionError> {
        let sessions = self.sessions.read().map_err(|_| SessionError::Poisoned)?;
        sessions.get(&id).cloned().ok_or(SessionError::UnknownSession(id))
    }

    /// Run `f` against the current state of session `id`.
    ///
    /// # Errors
    /// Fails for unknown sessions or poisoned locks.
    pub fn with_state<R>(&self, id: SessionId, f: impl FnOnce(&GameState) -> R) -> Result<R, SessionError> {
        let game = self.session(id)?;
        let state = lock(&game)?;
        Ok(f(&state))
    }

    /// Run one line of input in session `id`.
    ///
    /// # Errors
    /// Fails for unknown sessions, poisoned locks, or engine faults.
    pub fn submit(&self, id: SessionId, input: &str) -> Result<SessionReply, SessionError> {
        let game = self.session(id)?;
        let mut state = lock(&game)?;
        let response = self.engine.process(&mut state, input)?;
        Self::reply(id, &state, &response)
    }

    /// JSON snapshot of session `id` without running a command.
    ///
    /// # Errors
    /// Fails for unknown sessions, poisoned locks, or a dangling player location.
    pub fn snapshot(&self, id: SessionId) -> Result<serde_json::Value, SessionError> {
        let game = self.session(id)?;
        let state = lock(&game)?;
        Ok(serde_json::to_value(GameSnapshot::of(&state)?)?)
    }

    /// Write session `id` to `<dir>/<slot>.ron`.
    ///
    /// # Errors
    /// Fails for unknown sessions, poisoned locks, or file errors.
    pub fn save(&self, id: SessionId, dir: &Path, slot: &str) -> Result<PathBuf, SessionError> {
        let game = self.session(id)?;
        let doc = SaveDocument::capture(&*lock(&game)?);
        Ok(save_files::write_save(&doc, dir, slot)?)
    }

    /// Replace the game of session `id` (creating it if needed) with one
    /// rebuilt from `doc`.
    ///
    /// # Errors
    /// Returns [`SessionError::Poisoned`] if a lock is poisoned.
    pub fn restore(&self, id: SessionId, doc: &SaveDocument) -> Result<RestoreReport, SessionError> {
        let (restored, report) = save_files::restore(doc, &self.seed, self.lexicon.as_ref());
        let game = self.get_or_create(id)?;
        *lock(&game)? = restored;
        info!("session {id} restored from save of {}", doc.saved_at);
        Ok(report)
    }

    /// Drop session `id`. Returns whether it existed.
    ///
    /// # Errors
    /// Returns [`SessionError::Poisoned`] if the registry lock is poisoned.
    pub fn remove(&self, id: SessionId) -> Result<bool, SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Poisoned)?;
        let existed = sessions.remove(&id).is_some();
        if existed {
            info!("session {id} removed");
        }
        Ok(existed)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map_or(0, |sessions| sessions.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reply(id: SessionId, state: &GameState, response: &Response) -> Result<SessionReply, SessionError> {
        Ok(SessionReply {
            session_id: id,
            text: response.text.clone(),
            snapshot: serde_json::to_value(GameSnapshot::of(state)?)?,
            rejected: response.is_rejected(),
        })
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("world", &self.seed.title)
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

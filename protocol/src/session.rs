use std::collections::HashMap;

use bombdisposer_core::{GameConfig, GameState};
use uuid::Uuid;

use crate::*;

/// In-memory game storage keyed by session id.
///
/// A session exists from `create_session` until `delete_session`; it holds no
/// game until its first command runs.
#[derive(Debug, Default)]
pub struct SessionStore {
    config: GameConfig,
    sessions: HashMap<Uuid, Option<GameState>>,
}

impl SessionStore {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn create_session(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        log::debug!("Created session {}", id);
        self.sessions.insert(id, None);
        id
    }

    /// Returns `id` if it names a live session, otherwise opens a new one.
    pub fn resume(&mut self, id: Option<Uuid>) -> Uuid {
        match id {
            Some(id) if self.sessions.contains_key(&id) => id,
            Some(id) => {
                log::debug!("Session {} expired, opening a new one", id);
                self.create_session()
            }
            None => self.create_session(),
        }
    }

    pub fn get_session(&self, id: &Uuid) -> Result<Option<&GameState>> {
        self.sessions
            .get(id)
            .map(Option::as_ref)
            .ok_or(ProtocolError::UnknownSession(*id))
    }

    pub fn update_session(&mut self, id: &Uuid, game: GameState) -> Result<()> {
        let slot = self
            .sessions
            .get_mut(id)
            .ok_or(ProtocolError::UnknownSession(*id))?;
        *slot = Some(game);
        Ok(())
    }

    pub fn delete_session(&mut self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            log::debug!("Deleted session {}", id);
        }
        removed
    }

    /// Dispatches `command` against the session's game and stores the result.
    ///
    /// A failing command leaves the stored game untouched.
    pub fn apply(&mut self, id: &Uuid, command: &Command) -> Result<Reply> {
        let snapshot = self.get_session(id)?.cloned();
        let reply = dispatch(self.config, snapshot, command, rand::random())?;
        self.update_session(id, reply.game.clone())?;
        Ok(reply)
    }
}

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Serializable form of a game, handed to the caller for storage between
/// commands and fed back to [`GameEngine::from_snapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub flag_count: CellCount,
    pub mine_count: CellCount,
    pub game_over: bool,
    pub game_started: bool,
    /// Kept for wire compatibility, always zero.
    #[serde(default)]
    pub game_timer_start: u64,
    pub mine_ids: BTreeSet<TileId>,
    pub checked_ids: BTreeSet<TileId>,
    pub grid: Vec<Vec<Tile>>,
}

impl GameState {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("Could not decode snapshot: {}", err);
            GameError::MalformedSnapshot("snapshot is not a valid game record")
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

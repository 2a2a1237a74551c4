use bombdisposer_core::{CellCount, EngineState, GameEngine, GameState};
use serde::{Deserialize, Serialize};

use crate::*;

/// One player action against a session's game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Left click: the first one starts the game, later ones reveal.
    Move { tile: String },
    /// Right click: add or remove a flag.
    Flag { tile: String },
    /// Difficulty slider, only accepted before the first move.
    Density { value: CellCount },
    /// Throw the game away and deal a fresh board.
    Reset,
}

impl Command {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Continue,
    Win,
    Loss,
}

impl From<EngineState> for Outcome {
    fn from(state: EngineState) -> Self {
        match state {
            EngineState::Won => Self::Win,
            EngineState::Lost => Self::Loss,
            EngineState::NotStarted | EngineState::InProgress => Self::Continue,
        }
    }
}

/// Result of a dispatched command: the outcome, the display counter and the
/// snapshot to persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub outcome: Outcome,
    pub state: EngineState,
    pub mines_left: i32,
    /// Remaining mines formatted for the counter display.
    pub counter: String,
    /// Whether the command touched the board, a renderer can skip redrawing otherwise.
    pub changed: bool,
    pub game: GameState,
}

impl Reply {
    pub fn from_engine(engine: &GameEngine) -> Self {
        let state = engine.state();
        Self {
            outcome: state.into(),
            state,
            mines_left: engine.mines_left(),
            counter: engine.mine_counter(),
            changed: false,
            game: engine.snapshot(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use display::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use state::*;
pub use tile::*;
pub use types::*;

mod display;
mod engine;
mod error;
mod generator;
mod state;
mod tile;
mod types;

/// Board side used when nothing else is configured.
pub const DEFAULT_SIZE: Coord = 12;
/// Mine count a fresh game starts with.
pub const DEFAULT_MINES: CellCount = 20;
/// Pixel size of one tile, only meaningful to renderers.
pub const DEFAULT_TILE_SIZE: u16 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Tiles per row and per column.
    pub size: Coord,
    /// Initial mine count of a fresh board.
    pub mines: CellCount,
    pub tile_size: u16,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }

    /// Builds a config with at least a single tile. The mine count is only
    /// checked against the board when a game starts.
    pub fn new(size: Coord, mines: CellCount) -> Self {
        Self::new_unchecked(size.max(1), mines)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Largest mine count `start` accepts: every tile but the first click and one more.
    pub const fn max_mines(&self) -> CellCount {
        self.total_tiles().saturating_sub(2)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIZE, DEFAULT_MINES)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The click was ignored: tile already visible, flagged or checked, or game over.
    NoChange,
    Continue,
    Loss,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Continue => true,
            Loss => true,
        }
    }
}

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::NotStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_classic_board() {
        let config = GameConfig::default();
        assert_eq!(config.size, 12);
        assert_eq!(config.mines, 20);
        assert_eq!(config.tile_size, 30);
        assert_eq!(config.total_tiles(), 144);
        assert_eq!(config.max_mines(), 142);
    }

    #[test]
    fn config_has_at_least_one_tile() {
        assert_eq!(GameConfig::new(0, 0).size, 1);
    }

    #[test]
    fn config_fills_missing_fields_from_default() {
        let config: GameConfig = serde_json::from_str(r#"{"size": 9}"#).unwrap();
        assert_eq!(config, GameConfig::new_unchecked(9, DEFAULT_MINES));
    }
}

use std::fs;
use std::path::Path;

use anyhow::Context;
use bombdisposer_core::{CellCount, Coord, GameConfig};
use serde::Deserialize;

/// Layout of the settings file:
///
/// ```toml
/// [board]
/// size = 12
/// mines = 20
/// tile_size = 30
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    board: GameConfig,
}

pub(crate) fn parse(text: &str) -> anyhow::Result<GameConfig> {
    let settings: Settings = toml::from_str(text).context("Invalid settings file")?;
    Ok(settings.board)
}

/// Settings file first, then command line overrides.
pub(crate) fn load(
    path: Option<&Path>,
    size: Option<Coord>,
    mines: Option<CellCount>,
) -> anyhow::Result<GameConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read settings from {}", path.display()))?;
            parse(&text)?
        }
        None => GameConfig::default(),
    };

    if let Some(size) = size {
        config.size = size;
    }
    if let Some(mines) = mines {
        config.mines = mines;
    }

    let config = GameConfig {
        tile_size: config.tile_size,
        ..GameConfig::new(config.size, config.mines)
    };
    if config.mines > config.max_mines() {
        log::warn!(
            "{} mines do not fit a {}x{} board, the first move will be rejected",
            config.mines,
            config.size,
            config.size
        );
    }
    Ok(config)
}

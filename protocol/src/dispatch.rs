use bombdisposer_core::{GameConfig, GameEngine, GameState, RandomSampler};

use crate::*;

/// Runs exactly one command against a stored game.
///
/// `snapshot` is whatever the caller persisted after the previous command,
/// `None` for a session that never played. `seed` drives mine placement when
/// the command turns out to be the first move.
pub fn dispatch(
    config: GameConfig,
    snapshot: Option<GameState>,
    command: &Command,
    seed: u64,
) -> Result<Reply> {
    log::debug!("Dispatching {:?}", command);

    let mut engine = match command {
        Command::Reset => GameEngine::new(config),
        _ => GameEngine::construct(config, snapshot)?,
    };

    // only moves and flags can finish a game, the win check never runs for
    // density changes or resets
    let changed = match command {
        Command::Move { tile } if engine.state().is_initial() => {
            engine.start(tile, RandomSampler::new(seed))?.has_update() | engine.check_winner()
        }
        Command::Move { tile } => engine.reveal(tile)?.has_update() | engine.check_winner(),
        Command::Flag { tile } => engine.toggle_flag(tile)?.has_update() | engine.check_winner(),
        Command::Density { value } => {
            engine.set_density(*value)?;
            true
        }
        Command::Reset => {
            log::debug!("Dealt a fresh board");
            true
        }
    };
    if !changed {
        log::debug!("{:?} left the board untouched", command);
    }

    let reply = Reply {
        changed,
        ..Reply::from_engine(&engine)
    };
    log::debug!("Outcome {:?}, counter {}", reply.outcome, reply.counter);
    Ok(reply)
}

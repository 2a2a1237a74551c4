use alloc::vec::Vec;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that picks which tiles receive a mine when the game starts.
///
/// `candidates` never contains the first clicked tile. Implementations should
/// return exactly `amount` distinct ids taken from `candidates`; the engine
/// rejects anything else.
pub trait MineSampler {
    fn sample(self, candidates: &[TileId], amount: usize) -> Vec<TileId>;
}

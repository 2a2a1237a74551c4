use super::*;

/// Predetermined mine layout, used for replays and for forcing a board in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedSampler {
    mines: Vec<TileId>,
}

impl FixedSampler {
    pub fn new(mines: Vec<TileId>) -> Self {
        Self { mines }
    }

    pub fn from_coords(mines: &[Coord2]) -> Self {
        Self::new(mines.iter().copied().map(TileId::from_coords).collect())
    }
}

impl MineSampler for FixedSampler {
    fn sample(self, _candidates: &[TileId], _amount: usize) -> Vec<TileId> {
        self.mines
    }
}

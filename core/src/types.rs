/// Single coordinate axis used for the board side and tile positions.
pub type Coord = u8;

/// Count type used for mine counts, flag counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional position `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains on a `side × side` board.
fn apply_delta(coords: Coord2, delta: (isize, isize), side: Coord) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= side {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= side {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the up-to-8 in-bounds positions surrounding a tile.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    side: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.side);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), 3).collect();
        assert_eq!(neighbors, [(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(NeighborIter::new((0, 1), 3).count(), 5);
        assert_eq!(NeighborIter::new((2, 1), 3).count(), 5);
    }

    #[test]
    fn center_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), 3).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn single_tile_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), 1).count(), 0);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(12, 12), 144);
        assert_eq!(mult(255, 255), 65025);
    }
}

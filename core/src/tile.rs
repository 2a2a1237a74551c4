use alloc::format;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

const ID_PREFIX: &str = "tileR";
const ID_SEPARATOR: char = 'C';

/// Stable tile identifier of the form `tileR{row}C{col}`.
///
/// Used as the lookup key inside the engine and as the wire identifier for
/// player actions.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    pub fn from_coords((row, col): Coord2) -> Self {
        Self(format!("{ID_PREFIX}{row}{ID_SEPARATOR}{col}"))
    }

    /// Position encoded in the id, only if the id is in canonical form.
    pub fn coords(&self) -> Option<Coord2> {
        parse_coords(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_coords(id: &str) -> Option<Coord2> {
    let (row, col) = id.strip_prefix(ID_PREFIX)?.split_once(ID_SEPARATOR)?;
    let coords = (row.parse().ok()?, col.parse().ok()?);
    // reject "tileR01C1" and friends, they would never match a lookup key
    (TileId::from_coords(coords).0 == id).then_some(coords)
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TileId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match parse_coords(s) {
            Some(coords) => Ok(Self::from_coords(coords)),
            None => Err(GameError::UnknownTileId(s.into())),
        }
    }
}

impl Borrow<str> for TileId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<Coord2> for TileId {
    fn from(coords: Coord2) -> Self {
        Self::from_coords(coords)
    }
}

/// Semantic state of a single board cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub position: Coord2,
    pub has_mine: bool,
    pub is_visible: bool,
    pub has_flag: bool,
    pub neighbor_ids: SmallVec<[TileId; 8]>,
    pub neighbor_mine_count: u8,
}

impl Tile {
    /// A covered tile without a mine and without adjacency information yet.
    pub fn covered(position: Coord2) -> Self {
        Self {
            id: TileId::from_coords(position),
            position,
            has_mine: false,
            is_visible: false,
            has_flag: false,
            neighbor_ids: SmallVec::new(),
            neighbor_mine_count: 0,
        }
    }

    /// A revealed tile with no adjacent mines.
    pub fn is_clear(&self) -> bool {
        self.is_visible && !self.has_mine && self.neighbor_mine_count == 0
    }
}

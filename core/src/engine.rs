use alloc::collections::{BTreeSet, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use ndarray::Array2;
use smallvec::SmallVec;

use crate::*;

/// Authoritative game for one session.
///
/// An engine lives for a single command: the caller rebuilds it from the
/// stored [`GameState`], runs one command and stores [`GameEngine::snapshot`]
/// again.
#[derive(Clone, Debug, PartialEq)]
pub struct GameEngine {
    config: GameConfig,
    grid: Array2<Tile>,
    lookup: HashMap<TileId, Coord2>,
    mine_ids: BTreeSet<TileId>,
    checked_ids: BTreeSet<TileId>,
    flag_count: CellCount,
    mine_count: CellCount,
    game_over: bool,
    game_started: bool,
    game_timer_start: u64,
}

impl GameEngine {
    /// Fresh covered board without mines.
    pub fn new(config: GameConfig) -> Self {
        let side = usize::from(config.size);
        let grid = Array2::from_shape_fn((side, side), |(row, col)| {
            Tile::covered((row as Coord, col as Coord))
        });
        let lookup = build_lookup(&grid);
        Self {
            config,
            grid,
            lookup,
            mine_ids: BTreeSet::new(),
            checked_ids: BTreeSet::new(),
            flag_count: 0,
            mine_count: config.mines,
            game_over: false,
            game_started: false,
            game_timer_start: 0,
        }
    }

    /// Rebuilds the engine from a stored snapshot, or starts a fresh board when there is none.
    pub fn construct(config: GameConfig, snapshot: Option<GameState>) -> Result<Self> {
        match snapshot {
            Some(state) => Self::from_snapshot(config, state),
            None => Ok(Self::new(config)),
        }
    }

    pub fn from_snapshot(config: GameConfig, state: GameState) -> Result<Self> {
        use GameError::MalformedSnapshot;

        let side = usize::from(config.size);
        if state.grid.len() != side || state.grid.iter().any(|row| row.len() != side) {
            return Err(MalformedSnapshot("grid dimensions do not match the board size"));
        }

        for (row, tiles) in state.grid.iter().enumerate() {
            for (col, tile) in tiles.iter().enumerate() {
                let position = (row as Coord, col as Coord);
                if tile.position != position {
                    return Err(MalformedSnapshot("tile position does not match its place in the grid"));
                }
                if tile.id != TileId::from_coords(position) {
                    return Err(MalformedSnapshot("tile id does not match its position"));
                }
                if tile.neighbor_ids.len() > 8 || tile.neighbor_mine_count > 8 {
                    return Err(MalformedSnapshot("tile has more than 8 neighbors"));
                }
            }
        }

        let tiles: Vec<Tile> = state.grid.into_iter().flatten().collect();
        let grid = Array2::from_shape_vec((side, side), tiles)
            .map_err(|_| MalformedSnapshot("grid dimensions do not match the board size"))?;
        let lookup = build_lookup(&grid);
        let on_board = |id: &TileId| lookup.contains_key(id);

        if !grid.iter().all(|tile| tile.neighbor_ids.iter().all(on_board)) {
            return Err(MalformedSnapshot("neighbor id is not on the board"));
        }
        if !state.mine_ids.iter().all(on_board) || !state.checked_ids.iter().all(on_board) {
            return Err(MalformedSnapshot("mine or checked id is not on the board"));
        }
        if grid.iter().any(|tile| tile.has_mine != state.mine_ids.contains(&tile.id)) {
            return Err(MalformedSnapshot("mine set disagrees with the tiles"));
        }
        let expected_mines = if state.game_started {
            usize::from(state.mine_count)
        } else {
            0
        };
        if state.mine_ids.len() != expected_mines {
            return Err(MalformedSnapshot("mine set size disagrees with the mine count"));
        }
        let flagged = grid.iter().filter(|tile| tile.has_flag).count();
        if flagged != usize::from(state.flag_count) {
            return Err(MalformedSnapshot("flag count disagrees with the flagged tiles"));
        }
        if state.game_over && !state.game_started {
            return Err(MalformedSnapshot("game is over but never started"));
        }
        if !grid
            .iter()
            .all(|tile| has_expected_adjacency(&grid, tile, config.size, state.game_started))
        {
            return Err(MalformedSnapshot("tile adjacency disagrees with the mine layout"));
        }

        Ok(Self {
            config,
            grid,
            lookup,
            mine_ids: state.mine_ids,
            checked_ids: state.checked_ids,
            flag_count: state.flag_count,
            mine_count: state.mine_count,
            game_over: state.game_over,
            game_started: state.game_started,
            game_timer_start: state.game_timer_start,
        })
    }

    pub fn snapshot(&self) -> GameState {
        GameState {
            flag_count: self.flag_count,
            mine_count: self.mine_count,
            game_over: self.game_over,
            game_started: self.game_started,
            game_timer_start: self.game_timer_start,
            mine_ids: self.mine_ids.clone(),
            checked_ids: self.checked_ids.clone(),
            grid: self.grid.outer_iter().map(|row| row.to_vec()).collect(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn state(&self) -> EngineState {
        if !self.game_started {
            EngineState::NotStarted
        } else if !self.game_over {
            EngineState::InProgress
        } else if self.mine_ids.iter().any(|id| self.checked_ids.contains(id)) {
            EngineState::Lost
        } else {
            EngineState::Won
        }
    }

    pub fn is_started(&self) -> bool {
        self.game_started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flag_count)
    }

    /// Remaining-mine display, e.g. `"017"`.
    pub fn mine_counter(&self) -> String {
        format_counter(self.mines_left())
    }

    /// Density display shown next to the difficulty control.
    pub fn density_counter(&self) -> String {
        format_counter(i32::from(self.mine_count))
    }

    pub fn mine_ids(&self) -> &BTreeSet<TileId> {
        &self.mine_ids
    }

    pub fn checked_ids(&self) -> &BTreeSet<TileId> {
        &self.checked_ids
    }

    pub fn tile(&self, tile_id: &str) -> Result<&Tile> {
        let coords = self.resolve(tile_id)?;
        Ok(&self.grid[coords.to_nd_index()])
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<&Tile> {
        self.grid.get(coords.to_nd_index())
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.iter()
    }

    pub fn set_density(&mut self, value: CellCount) -> Result<()> {
        if self.game_started {
            log::warn!("Density change to {} rejected, game already started", value);
            return Err(GameError::InvalidConfiguration(
                "mine density can only change before the first move",
            ));
        }
        log::debug!("Density set to {}", value);
        self.mine_count = value;
        Ok(())
    }

    /// First move: places the mines away from `first_tile_id`, computes
    /// adjacency and reveals the clicked tile.
    pub fn start(&mut self, first_tile_id: &str, sampler: impl MineSampler) -> Result<RevealOutcome> {
        if self.game_started {
            return Err(GameError::AlreadyStarted);
        }
        let first = self.resolve(first_tile_id)?;
        if self.mine_count >= self.config.total_tiles().saturating_sub(1) {
            return Err(GameError::InvalidConfiguration(
                "too many mines for the board, at least two tiles must stay safe",
            ));
        }

        let first_id = self.grid[first.to_nd_index()].id.clone();
        let candidates: Vec<TileId> = self
            .grid
            .iter()
            .filter(|tile| tile.id != first_id)
            .map(|tile| tile.id.clone())
            .collect();
        let mine_ids = self.check_layout(sampler.sample(&candidates, self.mine_count.into()), &first_id)?;

        self.game_started = true;
        // check_layout only lets through ids present in the lookup
        for id in &mine_ids {
            let coords = self.lookup[id];
            self.grid[coords.to_nd_index()].has_mine = true;
        }
        self.mine_ids = mine_ids;
        self.compute_adjacency();
        log::debug!(
            "Game started at {} with {} mines",
            first_id,
            self.mine_ids.len()
        );

        Ok(self.reveal_at(first))
    }

    /// Reveals a tile, flooding through tiles without adjacent mines.
    pub fn reveal(&mut self, tile_id: &str) -> Result<RevealOutcome> {
        let coords = self.resolve(tile_id)?;
        if !self.game_started {
            return Err(GameError::NotStarted);
        }
        Ok(self.reveal_at(coords))
    }

    pub fn toggle_flag(&mut self, tile_id: &str) -> Result<MarkOutcome> {
        let coords = self.resolve(tile_id)?;
        let tile = &mut self.grid[coords.to_nd_index()];

        if tile.is_visible || self.game_over {
            return Ok(MarkOutcome::NoChange);
        }

        tile.has_flag = !tile.has_flag;
        if tile.has_flag {
            self.flag_count += 1;
        } else {
            self.flag_count = self.flag_count.saturating_sub(1);
        }
        log::debug!("Flag on {} is now {}", tile.id, tile.has_flag);
        Ok(MarkOutcome::Changed)
    }

    /// Ends the game as won once every safe tile has been checked. Returns
    /// `true` only on the call that makes the transition.
    pub fn check_winner(&mut self) -> bool {
        let target = usize::from(self.config.total_tiles().saturating_sub(self.mine_count));
        if self.game_started && !self.game_over && self.checked_ids.len() == target {
            self.game_over = true;
            log::debug!("Game won");
            true
        } else {
            false
        }
    }

    fn resolve(&self, tile_id: &str) -> Result<Coord2> {
        self.lookup.get(tile_id).copied().ok_or_else(|| {
            log::warn!("Unknown tile id {:?}", tile_id);
            GameError::UnknownTileId(tile_id.into())
        })
    }

    fn check_layout(&self, picked: Vec<TileId>, first_id: &TileId) -> Result<BTreeSet<TileId>> {
        let expected = usize::from(self.mine_count);
        let picked_len = picked.len();
        let mine_ids: BTreeSet<TileId> = picked.into_iter().collect();

        if picked_len != expected
            || mine_ids.len() != expected
            || mine_ids.contains(first_id)
            || !mine_ids.iter().all(|id| self.lookup.contains_key(id))
        {
            log::warn!(
                "Sampler returned {} ids ({} distinct) for {} mines",
                picked_len,
                mine_ids.len(),
                expected
            );
            return Err(GameError::InvalidConfiguration(
                "mine layout must be distinct tiles other than the first click",
            ));
        }
        Ok(mine_ids)
    }

    fn compute_adjacency(&mut self) {
        let side = self.config.size;
        for row in 0..side {
            for col in 0..side {
                let neighbors: SmallVec<[Coord2; 8]> = NeighborIter::new((row, col), side).collect();
                let mines = neighbors
                    .iter()
                    .filter(|&&pos| self.grid[pos.to_nd_index()].has_mine)
                    .count();

                let tile = &mut self.grid[(row, col).to_nd_index()];
                tile.neighbor_ids = neighbors.into_iter().map(TileId::from_coords).collect();
                tile.neighbor_mine_count = mines as u8;
            }
        }
    }

    fn can_reveal(&self, coords: Coord2) -> bool {
        let tile = &self.grid[coords.to_nd_index()];
        !(self.game_over || tile.is_visible || tile.has_flag || self.checked_ids.contains(&tile.id))
    }

    fn reveal_at(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.can_reveal(coords) {
            return RevealOutcome::NoChange;
        }

        let mut to_visit = VecDeque::from([coords]);
        let mut opened = 0usize;

        while let Some(visit_coords) = to_visit.pop_front() {
            if !self.can_reveal(visit_coords) {
                continue;
            }

            let tile = &mut self.grid[visit_coords.to_nd_index()];
            self.checked_ids.insert(tile.id.clone());
            tile.is_visible = true;
            opened += 1;

            if tile.has_mine {
                log::debug!("Mine hit at {}", tile.id);
                self.game_over = true;
                self.reveal_mines();
                return RevealOutcome::Loss;
            }

            if tile.neighbor_mine_count == 0 {
                log::trace!("Clear tile {}, expanding to {:?}", tile.id, tile.neighbor_ids);
                to_visit.extend(
                    tile.neighbor_ids
                        .iter()
                        .filter(|id| !self.checked_ids.contains(*id))
                        .filter_map(|id| self.lookup.get(id).copied()),
                );
            }
        }

        log::debug!("Revealed {} tiles from {:?}", opened, coords);
        RevealOutcome::Continue
    }

    fn reveal_mines(&mut self) {
        // mine ids are validated against the lookup on start and on rehydration
        for id in &self.mine_ids {
            let coords = self.lookup[id];
            self.grid[coords.to_nd_index()].is_visible = true;
        }
    }
}

/// Before the first move a tile carries no adjacency, afterwards it must list
/// exactly its in-bounds neighbors and count the mines among them.
fn has_expected_adjacency(grid: &Array2<Tile>, tile: &Tile, side: Coord, started: bool) -> bool {
    if !started {
        return tile.neighbor_ids.is_empty() && tile.neighbor_mine_count == 0;
    }

    let mut listed = tile.neighbor_ids.iter();
    let mut mines = 0u8;
    for pos in NeighborIter::new(tile.position, side) {
        if listed.next() != Some(&TileId::from_coords(pos)) {
            return false;
        }
        if grid[pos.to_nd_index()].has_mine {
            mines += 1;
        }
    }
    listed.next().is_none() && mines == tile.neighbor_mine_count
}

fn build_lookup(grid: &Array2<Tile>) -> HashMap<TileId, Coord2> {
    grid.iter()
        .map(|tile| (tile.id.clone(), tile.position))
        .collect()
}

use std::collections::{BTreeSet, VecDeque};

use bombdisposer_core::*;
use proptest::prelude::*;

fn id(coords: Coord2) -> String {
    TileId::from_coords(coords).to_string()
}

fn mine_coords(engine: &GameEngine) -> BTreeSet<Coord2> {
    engine
        .mine_ids()
        .iter()
        .filter_map(TileId::coords)
        .collect()
}

fn visible_coords(engine: &GameEngine) -> BTreeSet<Coord2> {
    engine
        .tiles()
        .filter(|tile| tile.is_visible)
        .map(|tile| tile.position)
        .collect()
}

/// Plain BFS over the mine layout, written without the engine's neighbor iterator.
fn reference_flood(side: Coord, mines: &BTreeSet<Coord2>, first: Coord2) -> BTreeSet<Coord2> {
    let around = |(row, col): Coord2| {
        let side = i16::from(side);
        let mut out = Vec::new();
        for d_row in -1..=1i16 {
            for d_col in -1..=1i16 {
                let (r, c) = (i16::from(row) + d_row, i16::from(col) + d_col);
                if (d_row, d_col) != (0, 0) && (0..side).contains(&r) && (0..side).contains(&c) {
                    out.push((r as Coord, c as Coord));
                }
            }
        }
        out
    };

    let mut seen = BTreeSet::from([first]);
    let mut queue = VecDeque::from([first]);
    while let Some(pos) = queue.pop_front() {
        let neighbors = around(pos);
        if neighbors.iter().any(|p| mines.contains(p)) {
            continue;
        }
        for next in neighbors {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn board() -> impl Strategy<Value = (Coord, CellCount, Coord2, u64)> {
    (3u8..=10).prop_flat_map(|side| {
        let max_mines = GameConfig::new(side, 0).max_mines();
        (
            Just(side),
            0..=max_mines,
            (0..side, 0..side),
            any::<u64>(),
        )
    })
}

fn started((side, mines, first, seed): (Coord, CellCount, Coord2, u64)) -> (GameEngine, RevealOutcome) {
    let mut engine = GameEngine::new(GameConfig::new(side, mines));
    let outcome = engine.start(&id(first), RandomSampler::new(seed)).unwrap();
    (engine, outcome)
}

#[test]
fn flood_matches_reference_on_fixture() {
    // 6x6 with a wall of mines down column 3
    let mines = [(0, 3), (1, 3), (2, 3), (3, 3), (5, 5)];
    let mut engine = GameEngine::new(GameConfig::new(6, mines.len() as CellCount));
    engine
        .start(&id((0, 0)), FixedSampler::from_coords(&mines))
        .unwrap();

    let expected = reference_flood(6, &mines.into_iter().collect(), (0, 0));
    assert_eq!(visible_coords(&engine), expected);
    // the flood wraps under the wall along the bottom row but never crosses it
    assert!(!expected.contains(&(0, 4)));
    assert!(expected.contains(&(4, 4)));
    assert_eq!(engine.checked_ids().len(), expected.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn first_click_never_hits_a_mine(params in board()) {
        let first = params.2;
        let (engine, outcome) = started(params);

        prop_assert_eq!(outcome, RevealOutcome::Continue);
        prop_assert!(!engine.tile_at(first).unwrap().has_mine);
        prop_assert!(engine.tile_at(first).unwrap().is_visible);
        prop_assert_eq!(engine.mine_ids().len(), usize::from(params.1));
        prop_assert_eq!(
            engine.tiles().filter(|tile| tile.has_mine).count(),
            usize::from(params.1)
        );
    }

    #[test]
    fn flood_matches_reference_bfs(params in board()) {
        let (side, _, first, _) = params;
        let (engine, _) = started(params);

        let expected = reference_flood(side, &mine_coords(&engine), first);
        prop_assert_eq!(visible_coords(&engine), expected);
    }

    #[test]
    fn win_fires_exactly_when_every_safe_tile_is_checked(params in board()) {
        let (mut engine, _) = started(params);
        let target = usize::from(GameConfig::new(params.0, 0).total_tiles() - params.1);
        let safe: Vec<Coord2> = engine
            .tiles()
            .filter(|tile| !tile.has_mine)
            .map(|tile| tile.position)
            .collect();

        let mut won = engine.check_winner();
        prop_assert_eq!(won, engine.checked_ids().len() == target);
        for pos in safe {
            if won {
                break;
            }
            prop_assert_ne!(engine.reveal(&id(pos)).unwrap(), RevealOutcome::Loss);
            won = engine.check_winner();
            prop_assert_eq!(won, engine.checked_ids().len() == target);
        }
        prop_assert!(won);
        prop_assert_eq!(engine.state(), EngineState::Won);
    }

    #[test]
    fn reveal_twice_changes_nothing(params in board(), pick in any::<prop::sample::Index>()) {
        let (mut engine, _) = started(params);
        let tiles: Vec<Coord2> = engine.tiles().map(|tile| tile.position).collect();
        let pos = tiles[pick.index(tiles.len())];

        engine.reveal(&id(pos)).unwrap();
        let once = engine.snapshot();
        prop_assert_eq!(engine.reveal(&id(pos)).unwrap(), RevealOutcome::NoChange);
        prop_assert_eq!(engine.snapshot(), once);
    }

    #[test]
    fn snapshot_round_trips(params in board(), flags in prop::collection::vec((0u8..10, 0u8..10), 0..6)) {
        let (mut engine, _) = started(params);
        for (row, col) in flags {
            if row < params.0 && col < params.0 {
                engine.toggle_flag(&id((row, col))).unwrap();
            }
        }

        let json = engine.snapshot().to_json().unwrap();
        let restored = GameEngine::from_snapshot(engine.config(), GameState::from_json(&json).unwrap()).unwrap();
        prop_assert_eq!(&restored, &engine);
        prop_assert_eq!(restored.mine_counter(), engine.mine_counter());
    }

    #[test]
    fn flags_move_the_count_by_one(params in board(), toggles in prop::collection::vec(any::<prop::sample::Index>(), 1..20)) {
        let (mut engine, _) = started(params);
        let tiles: Vec<Coord2> = engine.tiles().map(|tile| tile.position).collect();

        for pick in toggles {
            let pos = tiles[pick.index(tiles.len())];
            let before = engine.flag_count();
            let was_flagged = engine.tile_at(pos).unwrap().has_flag;

            match engine.toggle_flag(&id(pos)).unwrap() {
                MarkOutcome::NoChange => {
                    prop_assert!(engine.tile_at(pos).unwrap().is_visible);
                    prop_assert_eq!(engine.flag_count(), before);
                }
                MarkOutcome::Changed if was_flagged => prop_assert_eq!(engine.flag_count(), before - 1),
                MarkOutcome::Changed => prop_assert_eq!(engine.flag_count(), before + 1),
            }
        }
    }
}

use std::fmt::Write;

use bombdisposer_core::{EngineState, Tile};
use bombdisposer_protocol::Reply;

fn glyph(tile: &Tile) -> char {
    match (tile.is_visible, tile.has_mine, tile.has_flag) {
        (true, true, _) => '*',
        (true, false, _) => match tile.neighbor_mine_count {
            0 => '.',
            count => char::from(b'0' + count),
        },
        (false, _, true) => 'F',
        (false, _, false) => '#',
    }
}

fn face(state: EngineState) -> &'static str {
    match state {
        EngineState::Won => "B)",
        EngineState::Lost => ":(",
        EngineState::NotStarted | EngineState::InProgress => ":)",
    }
}

/// Plain text board with row and column indices and the counter line.
pub(crate) fn render(reply: &Reply) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "mines {}  {}", reply.counter, face(reply.state));
    if reply.state.is_finished() {
        out.push_str("game over, type `reset` to play again\n");
    }

    out.push_str("    ");
    for col in 0..reply.game.grid.len() {
        let _ = write!(out, "{:>2}", col % 100);
    }
    out.push('\n');

    for (row, tiles) in reply.game.grid.iter().enumerate() {
        let _ = write!(out, "{row:>3} ");
        for tile in tiles {
            let _ = write!(out, " {}", glyph(tile));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bombdisposer_core::{FixedSampler, GameConfig, GameEngine};

    #[test]
    fn draws_a_finished_board() {
        let mut engine = GameEngine::new(GameConfig::new(3, 1));
        engine
            .start("tileR0C0", FixedSampler::from_coords(&[(2, 2)]))
            .unwrap();
        engine.check_winner();

        let text = render(&Reply::from_engine(&engine));

        assert_eq!(
            text,
            "mines 001  B)\ngame over, type `reset` to play again\n     0 1 2\n  0  . . .\n  1  . 1 1\n  2  . 1 #\n"
        );
    }

    #[test]
    fn flags_and_covered_tiles() {
        let mut engine = GameEngine::new(GameConfig::new(2, 1));
        engine.toggle_flag("tileR1C1").unwrap();

        let text = render(&Reply::from_engine(&engine));

        assert!(text.starts_with("mines 000  :)\n"));
        assert!(text.ends_with("  1  # F\n"));
    }
}

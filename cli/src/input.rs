use bombdisposer_core::{CellCount, Coord, TileId};
use bombdisposer_protocol::Command;
use thiserror::Error;

/// One line typed by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Command(Command),
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum InputError {
    #[error("Unknown command {0:?}, type `help` for a list")]
    UnknownCommand(String),
    #[error("Expected a tile id like tileR0C0 or a `row col` pair")]
    BadTile,
    #[error("Expected a mine count")]
    BadDensity,
}

pub(crate) const HELP: &str = "\
commands:
  reveal <tile>   (r)  reveal a tile, the first reveal deals the mines
  flag <tile>     (f)  add or remove a flag
  density <n>     (d)  set the mine count before the first move
  reset                start over
  show                 redraw the board
  quit            (q)
tiles are written as tileR<row>C<col> or as `<row> <col>`";

/// Parses a line, `Ok(None)` for blank lines.
pub(crate) fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let input = match verb.to_ascii_lowercase().as_str() {
        "r" | "reveal" | "move" => Input::Command(Command::Move {
            tile: parse_tile(&rest)?,
        }),
        "f" | "flag" => Input::Command(Command::Flag {
            tile: parse_tile(&rest)?,
        }),
        "d" | "density" => Input::Command(Command::Density {
            value: parse_density(&rest)?,
        }),
        "reset" => Input::Command(Command::Reset),
        "show" => Input::Show,
        "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => return Err(InputError::UnknownCommand(verb.into())),
    };
    Ok(Some(input))
}

fn parse_tile(args: &[&str]) -> Result<String, InputError> {
    match args {
        [id] => id.parse::<TileId>().map(|id| id.to_string()).map_err(|_| InputError::BadTile),
        [row, col] => {
            let row: Coord = row.parse().map_err(|_| InputError::BadTile)?;
            let col: Coord = col.parse().map_err(|_| InputError::BadTile)?;
            Ok(TileId::from_coords((row, col)).to_string())
        }
        _ => Err(InputError::BadTile),
    }
}

fn parse_density(args: &[&str]) -> Result<CellCount, InputError> {
    match args {
        [value] => value.parse().map_err(|_| InputError::BadDensity),
        _ => Err(InputError::BadDensity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        match parse(line) {
            Ok(Some(Input::Command(command))) => command,
            other => panic!("{line:?} parsed as {other:?}"),
        }
    }

    #[test]
    fn tiles_by_id_or_pair() {
        assert_eq!(
            command("r tileR3C4"),
            Command::Move {
                tile: "tileR3C4".into()
            }
        );
        assert_eq!(
            command("flag 3 4"),
            Command::Flag {
                tile: "tileR3C4".into()
            }
        );
    }

    #[test]
    fn density_and_reset() {
        assert_eq!(command("d 30"), Command::Density { value: 30 });
        assert_eq!(command("RESET"), Command::Reset);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn controls() {
        assert_eq!(parse("q"), Ok(Some(Input::Quit)));
        assert_eq!(parse("show"), Ok(Some(Input::Show)));
        assert_eq!(parse("?"), Ok(Some(Input::Help)));
    }

    #[test]
    fn bad_input_is_explained() {
        assert_eq!(parse("dig 1 1"), Err(InputError::UnknownCommand("dig".into())));
        assert_eq!(parse("r 1"), Err(InputError::BadTile));
        assert_eq!(parse("r tileR01C1"), Err(InputError::BadTile));
        assert_eq!(parse("f -1 2"), Err(InputError::BadTile));
        assert_eq!(parse("d lots"), Err(InputError::BadDensity));
    }
}

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use bombdisposer_core::{CellCount, Coord, GameEngine};
use bombdisposer_protocol::{Reply, SessionStore};
use clap::Parser;

use input::Input;

mod board;
mod input;
mod settings;

/// Play a game of Minesweeper against the session engine from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board settings file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tiles per side, overrides the settings file
    #[arg(long)]
    size: Option<Coord>,

    /// Mines on a fresh board, overrides the settings file
    #[arg(long)]
    mines: Option<CellCount>,

    /// Print every reply as JSON instead of drawing the board
    #[arg(long)]
    json: bool,
}

fn show(reply: &Reply, json: bool) -> anyhow::Result<()> {
    let text = if json {
        reply.to_json()?
    } else {
        board::render(reply)
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let config = settings::load(args.config.as_deref(), args.size, args.mines)?;
    log::debug!("Board config: {:?}", config);

    let mut store = SessionStore::new(config);
    let session = store.create_session();
    let current = |store: &SessionStore| -> anyhow::Result<Reply> {
        let snapshot = store.get_session(&session)?.cloned();
        Ok(Reply::from_engine(&GameEngine::construct(config, snapshot)?))
    };

    show(&current(&store)?, args.json)?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        match input::parse(&line) {
            Ok(None) => {}
            Ok(Some(Input::Quit)) => break,
            Ok(Some(Input::Help)) => println!("{}", input::HELP),
            Ok(Some(Input::Show)) => show(&current(&store)?, args.json)?,
            Ok(Some(Input::Command(command))) => match store.apply(&session, &command) {
                Ok(reply) => show(&reply, args.json)?,
                Err(err) => eprintln!("{err}"),
            },
            Err(err) => eprintln!("{err}"),
        }
    }

    store.delete_session(&session);
    Ok(())
}

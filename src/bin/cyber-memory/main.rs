use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cyber_memory::{
    CardId, FileStore, GameConfig, GameController, GameRng, KeyValueStore, ManualScheduler,
    Outcome, TerminalView, UiEvent, View,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type TerminalGame<S, R, W> = GameController<S, TerminalView<R, W>, ManualScheduler>;

/// Play the memory game in a terminal.
#[derive(Parser, Debug)]
#[command(name = "cyber-memory")]
struct Args {
    /// Seed for the board shuffle; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file used as the local key-value store.
    #[arg(long, default_value = "cyber-memory-store.json")]
    store: PathBuf,
    /// TOML file overriding the default game settings.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let rng = args.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let store = FileStore::open(&args.store)
        .with_context(|| format!("opening store {}", args.store.display()))?;

    let mut game =
        GameController::new(config, rng, store, TerminalView::stdio(), ManualScheduler::new())?;
    info!(seed = game.seed(), store = %args.store.display(), "game started");

    run(&mut game, std::thread::sleep);
    Ok(())
}

/// Read commands until the player quits, input ends or the win prompt navigates away.
///
/// `pace` is called with each wait before the pending timers are delivered.
fn run<S, R, W>(game: &mut TerminalGame<S, R, W>, mut pace: impl FnMut(Duration))
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    game.view_mut()
        .message("Pick a card by its number, `r` to deal a new board, `q` to quit.");
    game.view_mut().present();

    while game.view().navigated().is_none() {
        let Some(line) = game.view_mut().read_line() else {
            break;
        };
        match line.as_str() {
            "" => continue,
            "q" | "quit" => break,
            "r" | "reset" => {
                game.dispatch(UiEvent::ResetClicked);
            }
            other => match other.parse::<u16>() {
                Ok(n) => match game.dispatch(UiEvent::CardClicked(CardId::new(n))) {
                    Outcome::Ignored(reason) => {
                        game.view_mut().message(&format!("Ignored: {reason}"));
                    }
                    Outcome::Won(summary) => {
                        game.view_mut()
                            .message(&format!("You earned {} points.", summary.points));
                    }
                    _ => {}
                },
                Err(_) => game.view_mut().message(&format!("Unknown command `{other}`")),
            },
        }

        // Deliver pending timers as they come due
        while let Some(wait) = game.scheduler().until_next() {
            pace(wait);
            game.advance_time(wait);
        }
    }
}

use std::io;
use std::panic;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use terminal_snake::config::GameConfig;
use terminal_snake::error::GameError;
use terminal_snake::game::Game;
use terminal_snake::input::CrosstermInput;
use terminal_snake::logging;
use terminal_snake::terminal_runtime::{cleanup_terminal_best_effort, TerminalSession};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed the random generator for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Read settings from this JSON file instead of the user config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append tracing output to this file (filter with SNAKE_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    // Report config problems before entering raw mode so they stay readable.
    let config = match GameConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) if cli.config.is_none() => {
            eprintln!("Warning: {error}; using default settings");
            GameConfig::default()
        }
        Err(error) => return Err(error.into()),
    };

    install_panic_hook();
    run(config, cli.seed)?;
    Ok(())
}

fn run(config: GameConfig, seed: Option<u64>) -> io::Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(?seed, heartbeat = ?config.heartbeat, "starting");

    let (width, height) = config.required_extent();
    let session = TerminalSession::enter(width, height)?;
    let mut game = Game::new(config, session, CrosstermInput::default(), rng)?;
    game.run()
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}

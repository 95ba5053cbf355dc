use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rusty_tictactoe::cli::Cli;
use rusty_tictactoe::console;
use rusty_tictactoe::controller::Controller;
use rusty_tictactoe::min_max::cache::BestMoveCache;
use rusty_tictactoe::persist;
use rusty_tictactoe::players::Roster;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)))
        .with_writer(std::io::stderr)
        .init();

    let cache = if cli.no_persist {
        BestMoveCache::default()
    } else {
        persist::load_or_default(&cli.cache_file)
    };

    let mut controller = Controller::new(Roster::new(cache, cli.seed), console::stdio());
    let outcome = controller.run();

    // flush the cache even when the session ended with an error
    let (roster, _) = controller.into_parts();
    if !cli.no_persist {
        persist::save_or_warn(roster.hard.cache(), &cli.cache_file);
    }

    outcome.context("game session aborted")
}

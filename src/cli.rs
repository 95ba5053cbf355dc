use std::path::PathBuf;

use clap::Parser;

/// Tic-tac-toe against a human or one of three AI levels.
#[derive(Parser, Debug)]
#[command(name = "rusty-tictactoe")]
#[command(version, long_about = None)]
pub struct Cli {
    /// File the hard AI's best moves are loaded from and saved to
    #[arg(long, default_value = "moves.json")]
    pub cache_file: PathBuf,

    /// Keep the best-move cache in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// Seed for every random choice, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log: String,
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use crate::cli::Cli;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["rusty-tictactoe"]);
        assert_eq!(cli.cache_file, Path::new("moves.json"));
        assert!(!cli.no_persist);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.log, "warn");
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from(["rusty-tictactoe", "--cache-file", "/tmp/m.json", "--seed", "42", "--no-persist"]);
        assert_eq!(cli.cache_file, Path::new("/tmp/m.json"));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.no_persist);
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while playing a game.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GameError {
    #[error("cell index {index} is out of bounds (must be 0-8)")]
    IndexOutOfRange { index: usize },

    #[error("cell {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("no empty cell left for a move on board '{board}'")]
    NoMovesAvailable { board: String },

    #[error("no players are seated")]
    NoPlayers,

    #[error("board '{board}' has winning lines for both marks")]
    InvalidPosition { board: String },

    #[error("input closed while waiting for a move")]
    InputClosed,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;

impl From<std::io::Error> for GameError {
    fn from(source: std::io::Error) -> Self {
        GameError::Io {
            operation: "access the console".to_string(),
            source,
        }
    }
}

/// Rejected coordinate input from a human player.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("You should enter two numbers separated by space!")]
    Malformed,

    #[error("Coordinates should be from 1 to 3!")]
    OutOfRange,

    #[error("This cell is occupied! Choose another one!")]
    Occupied,
}

/// Rejected line at the command prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("'{command}' expects {expected} arguments, got {got}")]
    WrongArity {
        command: String,
        expected: usize,
        got: usize,
    },
}

/// Failures reading or writing the best-move snapshot.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CacheError {
    #[error("failed to {operation} {path:?}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot {path:?} is not valid: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error(transparent)]
    InvalidBoard(#[from] ParseBoardError),

    #[error("snapshot entry '{board}' has unplayable moves {moves}")]
    UnplayableEntry { board: String, moves: String },
}

/// A board string that is not nine cell characters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid board '{board}': {reason}")]
pub struct ParseBoardError {
    pub board: String,
    pub reason: String,
}

impl ParseBoardError {
    pub fn new(board: &str, reason: impl Into<String>) -> Self {
        Self { board: board.to_string(), reason: reason.into() }
    }
}

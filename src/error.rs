//! Error types for the crate.

use thiserror::Error;

use crate::types::Player;

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: cell ({row}, {col}) is occupied or out of bounds")]
    IllegalMove { row: usize, col: usize },

    #[error("game already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {actual}'s")]
    OutOfTurn { expected: Player, actual: Player },

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("grid size {size} is too small (minimum 3)")]
    InvalidGridSize { size: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported agent save format version {found} (expected {expected})")]
    UnsupportedSaveVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation}: {message}")]
    Serialization { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

//! Error types for the 8-puzzle solver.

use thiserror::Error;

/// Errors raised by board construction, parsing and the search core.
///
/// `MissingBlank` and `UnknownTile` are contract breaches: boards handed to
/// the search core are expected to be valid permutations of `0..=8`. The
/// remaining variants come from parsing user supplied boards.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("board has no blank cell")]
    MissingBlank,

    #[error("tile {tile} has no goal position")]
    UnknownTile { tile: u8 },

    #[error("expected {expected} rows, found {found}")]
    InvalidRowCount { expected: usize, found: usize },

    #[error("row {row} has {found} values (expected {expected})")]
    InvalidRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid tile value '{value}' in row {row} col {col}")]
    InvalidTileValue {
        value: String,
        row: usize,
        col: usize,
    },

    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u8 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PuzzleError>;

//! Error types for the eight-puzzle crate

use thiserror::Error;

use crate::puzzle::Move;

/// Main error type for the eight-puzzle crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board shape: expected 3 rows, got {rows}")]
    InvalidShape { rows: usize },

    #[error("invalid row {row}: expected 3 cells, got {got}")]
    InvalidRowLength { row: usize, got: usize },

    #[error("invalid board: expected 9 cells, got {got} in '{context}'")]
    InvalidCellCount { got: usize, context: String },

    #[error("tile {value} out of range (expected 1..=8 or blank)")]
    TileOutOfRange { value: u8 },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u8 },

    #[error("invalid token '{token}' in '{context}'")]
    InvalidToken { token: String, context: String },

    #[error("illegal move: blank cannot move {direction} from row {row}, column {col}")]
    IllegalMove {
        direction: Move,
        row: usize,
        col: usize,
    },
}

/// Result type alias for eight-puzzle operations
pub type Result<T> = std::result::Result<T, Error>;

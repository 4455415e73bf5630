//! Errors produced by the life engine.

use thiserror::Error;

/// Everything that can go wrong while building or querying a [`Field`](crate::proc::Field).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A row's length differs from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedInput {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A row contains something other than the dead/alive markers.
    #[error("invalid character {ch:?} at row {row}, column {col}")]
    InvalidCharacter { row: usize, col: usize, ch: char },

    /// Coordinate outside the field.
    #[error("cell ({row}, {col}) is outside a {h}x{w} field")]
    OutOfBounds {
        row: usize,
        col: usize,
        h: usize,
        w: usize,
    },
}

pub type Result<T> = std::result::Result<T, FieldError>;

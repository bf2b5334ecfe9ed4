//! Error types for the `life-grid` crate.
//!
//! All fallible grid operations return [`GridError`]. Every variant is a
//! programmer-error class condition: the caller passed a coordinate or a
//! shape that the grid cannot represent.

/// Errors that can occur during grid access or construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A coordinate fell outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },

    /// The cell data does not form a `rows x cols` rectangle.
    #[error("invalid grid dimensions: {reason}")]
    InvalidDimensions {
        /// What is wrong with the shape.
        reason: String,
    },

    /// A numeric cell value other than 0 or 1.
    #[error("invalid cell value {value} at ({row}, {col})")]
    InvalidCellValue {
        /// Row of the offending value.
        row: usize,
        /// Column of the offending value.
        col: usize,
        /// The value found.
        value: u8,
    },

    /// A character in a text pattern that is neither live nor dead.
    #[error("invalid pattern character {found:?} at line {line}, column {col}")]
    InvalidPatternChar {
        /// Zero-based pattern line (blank lines excluded).
        line: usize,
        /// Zero-based character column.
        col: usize,
        /// The character found.
        found: char,
    },
}

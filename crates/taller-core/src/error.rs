//! Error types for taller-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the sheet model
#[derive(Debug, Error)]
pub enum Error {
    /// Text that is not an A1 address, or a 0 where counting starts at 1
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Position beyond the last row or column a sheet can hold
    #[error("Cell {row}:{col} (0-based) is outside the sheet ({max_rows} rows, {max_cols} columns)")]
    OutOfRange {
        row: u32,
        col: u32,
        max_rows: u32,
        max_cols: u16,
    },
}

impl Error {
    pub(crate) fn out_of_range(row: u32, col: u32) -> Self {
        Error::OutOfRange {
            row,
            col,
            max_rows: crate::MAX_ROWS,
            max_cols: crate::MAX_COLS,
        }
    }
}

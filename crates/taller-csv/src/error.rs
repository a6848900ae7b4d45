//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors raised while reading or writing a sheet file
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed
    #[error("Malformed line {line}: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// Writing through the csv encoder failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file is larger than a sheet can hold
    #[error("Sheet limit exceeded: {0}")]
    Core(#[from] taller_core::Error),
}

impl CsvError {
    /// A read error, tagged with the line it happened on
    pub(crate) fn malformed(source: csv::Error, fallback_line: u64) -> Self {
        let line = source
            .position()
            .map(|p| p.line())
            .unwrap_or(fallback_line);
        CsvError::Malformed { line, source }
    }
}

//! Error types for the ticket editor

use thiserror::Error;

use crate::credentials::CredentialError;
use crate::ticket::TicketId;

/// Result type alias using [`EditorError`]
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors raised by a sheet store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The sheet file could not be parsed or written as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] taller_csv::CsvError),

    /// Cell position rejected by the sheet model
    #[error("Core error: {0}")]
    Core(#[from] taller_core::Error),

    /// The backend refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while opening the store connection
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Credentials could not be loaded or are malformed
    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// The document could not be opened
    #[error("Cannot open document '{document}': {source}")]
    Store {
        document: String,
        #[source]
        source: StoreError,
    },

    /// Layout or credential settings are unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Errors surfaced by the ticket editor workflow
#[derive(Debug, Error)]
pub enum EditorError {
    /// The store connection is not usable
    #[error("Connection failure: {0}")]
    Connection(#[from] ConnectError),

    /// The key column is missing from the sheet header
    #[error("Column '{0}' not found in the sheet header")]
    MissingColumn(String),

    /// No row carries the ticket id
    #[error("Ticket {0} not found")]
    NotFound(TicketId),

    /// The table could not be read
    #[error("Failed to read the sheet: {0}")]
    Read(#[source] StoreError),

    /// The row no longer holds the ticket being saved
    #[error("Row {row} no longer holds {ticket} (found {})", .found.as_deref().unwrap_or("an empty key"))]
    RowMismatch {
        ticket: TicketId,
        row: u32,
        found: Option<String>,
    },

    /// A cell write failed; writes before it stay applied
    #[error("Failed to write row {row}, column {column} ({completed} of 5 writes applied): {source}")]
    Write {
        row: u32,
        column: u16,
        completed: usize,
        #[source]
        source: StoreError,
    },
}

impl EditorError {
    /// Whether the person can simply try again with other input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EditorError::NotFound(_) | EditorError::RowMismatch { .. } | EditorError::Write { .. }
        )
    }
}

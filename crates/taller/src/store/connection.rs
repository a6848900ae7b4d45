//! Explicit store connection with an open / reopen / close lifecycle

use std::path::PathBuf;

use taller_core::{CellValue, RecordSet};
use tracing::{info, warn};

use super::{CsvSheetStore, SheetStore};
use crate::config::TallerConfig;
use crate::credentials::{CredentialSource, ServiceAccount};
use crate::error::{ConnectError, StoreError};

/// The process-wide handle to the ticket sheet
///
/// Opened once at start-up and handed to the editor. Nothing reconnects on
/// its own: a failed call fails the request, and [`Connection::reopen`] is
/// the only way to rebuild the handle.
#[derive(Debug)]
pub struct Connection {
    document: PathBuf,
    credentials: Option<CredentialSource>,
    account: Option<ServiceAccount>,
    store: CsvSheetStore,
}

impl Connection {
    /// Validate credentials (when configured) and open the document
    pub fn open(config: &TallerConfig) -> Result<Self, ConnectError> {
        config.layout.validate().map_err(ConnectError::Config)?;
        let credentials = config
            .credential_source()
            .map_err(|e| ConnectError::Config(e.to_string()))?;
        Self::open_with(config.store.document.clone(), credentials)
    }

    fn open_with(
        document: PathBuf,
        credentials: Option<CredentialSource>,
    ) -> Result<Self, ConnectError> {
        let account = match &credentials {
            Some(source) => Some(source.load().map_err(|e| {
                warn!(error = %e, "credentials rejected");
                e
            })?),
            None => None,
        };

        let store = CsvSheetStore::open(&document).map_err(|source| ConnectError::Store {
            document: document.display().to_string(),
            source,
        })?;

        info!(
            document = %document.display(),
            account = account.as_ref().map(|a| a.client_email.as_str()).unwrap_or("-"),
            "sheet connection open"
        );

        Ok(Self {
            document,
            credentials,
            account,
            store,
        })
    }

    /// Drop the current handle and open a fresh one from the same settings
    pub fn reopen(&mut self) -> Result<(), ConnectError> {
        let fresh = Self::open_with(self.document.clone(), self.credentials.clone())?;
        *self = fresh;
        Ok(())
    }

    /// Service account the connection was authorized with
    pub fn account(&self) -> Option<&ServiceAccount> {
        self.account.as_ref()
    }

    /// Tear the connection down
    pub fn close(self) {
        info!(document = %self.document.display(), "sheet connection closed");
    }
}

impl SheetStore for Connection {
    fn document_id(&self) -> &str {
        self.store.document_id()
    }

    fn read_records(&self) -> Result<RecordSet, StoreError> {
        self.store.read_records()
    }

    fn write_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), StoreError> {
        self.store.write_cell(row, col, value)
    }
}

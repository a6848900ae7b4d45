//! # taller
//!
//! Service-ticket editor over a shared sheet.
//!
//! A technician looks a ticket up by case number, edits status, costs and
//! diagnosis, and the changes are written back to the ticket's row. The
//! total is always recomputed from the itemized costs, and the row can be
//! flagged for the process that notifies customers.
//!
//! ## Example
//!
//! ```rust
//! use taller::prelude::*;
//!
//! let store = MemorySheetStore::from_rows(&[
//!     &["ID_Caso", "Cliente", "Estado"],
//!     &["CASO-7", "Ana Rojas", "Ingresado"],
//! ]).unwrap();
//! let mut editor = TicketEditor::new(store, SheetLayout::default());
//!
//! let mut form = editor.open_form(7).unwrap();
//! form.edits.status = Status::Entregado;
//! form.edits.costs.maintenance = 500;
//!
//! let receipt = editor.save(&form.ticket_id, form.row, &form.edits).unwrap();
//! assert_eq!(receipt.total, 500);
//! assert_eq!(receipt.row.get(), 2);
//! ```

pub mod config;
pub mod cost;
pub mod credentials;
pub mod editor;
pub mod error;
pub mod form;
pub mod layout;
pub mod prelude;
pub mod store;
pub mod ticket;

pub use config::{ConfigError, TallerConfig};
pub use cost::{CostSheet, PartsLine};
pub use credentials::{CredentialError, CredentialSource, ServiceAccount};
pub use editor::{LookupHit, SaveReceipt, TicketEditor};
pub use error::{ConnectError, EditorError, Result, StoreError};
pub use form::{EditForm, TicketEdits};
pub use layout::{ColumnNames, SheetLayout, SheetRow};
pub use store::{Connection, CsvSheetStore, MemorySheetStore, SheetStore};
pub use ticket::{IntakeFields, Status, Ticket, TicketId};

// Re-export core types
pub use taller_core::{CellAddress, CellValue, Record, RecordSet, Worksheet};

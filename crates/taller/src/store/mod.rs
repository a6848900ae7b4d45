//! Sheet store backends
//!
//! A store is the external table the tickets live in. The editor needs two
//! things from it: every row as a header-keyed record, and a single-cell
//! write addressed by 1-based row and column.

mod connection;
mod csv;
mod memory;

pub use self::connection::Connection;
pub use self::csv::CsvSheetStore;
pub use self::memory::{CellWrite, MemorySheetStore};

use taller_core::{CellValue, RecordSet};

use crate::error::StoreError;

/// Access to the table holding the tickets
pub trait SheetStore {
    /// Identifier of the document behind the store
    fn document_id(&self) -> &str;

    /// Read the whole table as records keyed by trimmed header
    fn read_records(&self) -> Result<RecordSet, StoreError>;

    /// Write one cell; `row` and `col` count from 1
    fn write_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), StoreError>;
}

impl<S: SheetStore + ?Sized> SheetStore for Box<S> {
    fn document_id(&self) -> &str {
        (**self).document_id()
    }

    fn read_records(&self) -> Result<RecordSet, StoreError> {
        (**self).read_records()
    }

    fn write_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), StoreError> {
        (**self).write_cell(row, col, value)
    }
}

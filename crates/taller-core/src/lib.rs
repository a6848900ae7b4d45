//! # taller-core
//!
//! Tabular data model for the taller service-ticket editor.
//!
//! This crate provides the types every store backend and the editor share:
//! - [`CellValue`] - A cell value (number, text, boolean or nothing)
//! - [`CellAddress`] - A cell's location, convertible to and from A1 notation
//! - [`Worksheet`] - A sparse grid of cells with a header row
//! - [`Record`] and [`RecordSet`] - Data rows keyed by their trimmed header name
//!
//! ## Example
//!
//! ```rust
//! use taller_core::{CellValue, Worksheet};
//!
//! let mut sheet = Worksheet::new("Casos");
//! sheet.set_cell_value("A1", "ID_Caso").unwrap();
//! sheet.set_cell_value("B1", " Estado ").unwrap();
//! sheet.set_cell_value("A2", "CASO-7").unwrap();
//! sheet.set_cell_value_at(1, 1, CellValue::text("Ingresado")).unwrap();
//!
//! let set = sheet.record_set();
//! assert_eq!(set.records[0].text("Estado").as_deref(), Some("Ingresado"));
//! ```

pub mod cell;
pub mod error;
pub mod record;
pub mod worksheet;

pub use cell::{CellAddress, CellValue, SharedString};
pub use error::{Error, Result};
pub use record::{Record, RecordSet};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u16 = 16_384;

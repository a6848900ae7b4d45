//! # taller-csv
//!
//! CSV reader and writer for taller sheets.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, Dialect, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;

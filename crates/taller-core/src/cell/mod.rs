//! Cells: what they hold and where they are

mod address;
mod value;

pub use address::{column_index, column_letters, CellAddress};
pub use value::{CellValue, SharedString};

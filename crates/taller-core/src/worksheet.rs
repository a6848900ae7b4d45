//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellValue};
use crate::error::Result;
use crate::record::{Record, RecordSet};

/// A worksheet: a sparse grid of cells whose first row holds the headers
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage keyed by (row, col), 0-based
    cells: BTreeMap<(u32, u16), CellValue>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "K2")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by 0-based indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by 0-based indices
    ///
    /// Setting [`CellValue::Empty`] removes the cell.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        CellAddress::new(row, col).check()?;
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        Ok(())
    }

    // === Extent ===

    /// Address of the bottom-right corner of the used area, anchored at A1
    pub fn extent(&self) -> Option<CellAddress> {
        let max_row = self.cells.keys().map(|(r, _)| *r).max()?;
        let max_col = self.cells.keys().map(|(_, c)| *c).max()?;
        Some(CellAddress::new(max_row, max_col))
    }

    /// Number of rows from the first row to the last used one
    pub fn row_count(&self) -> u32 {
        self.extent().map(|e| e.row + 1).unwrap_or(0)
    }

    /// Values of one row from column A through `last_col`
    pub fn row_values(&self, row: u32, last_col: u16) -> Vec<CellValue> {
        (0..=last_col)
            .map(|col| self.get_value_at(row, col))
            .collect()
    }

    // === Records ===

    /// Trimmed header names from the first row
    pub fn headers(&self) -> Vec<String> {
        match self.extent() {
            Some(extent) => self
                .row_values(0, extent.col)
                .iter()
                .map(|v| v.to_string().trim().to_string())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Read every row below the header as a header-keyed record
    pub fn record_set(&self) -> RecordSet {
        let Some(extent) = self.extent() else {
            return RecordSet::default();
        };

        let headers = self.headers();
        let records = (1..=extent.row)
            .map(|row| Record::from_row(&headers, self.row_values(row, extent.col)))
            .collect();

        RecordSet { headers, records }
    }
}

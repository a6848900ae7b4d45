//! In-process store

use taller_core::{CellAddress, CellValue, RecordSet, Worksheet};

use super::SheetStore;
use crate::error::StoreError;

/// One applied cell write, 1-based
#[derive(Debug, Clone, PartialEq)]
pub struct CellWrite {
    pub row: u32,
    pub col: u16,
    pub value: CellValue,
}

/// A store kept in memory, with a log of applied writes
///
/// A write budget can be set to make the store fail after a number of
/// successful writes, which is how partial saves are reproduced.
#[derive(Debug, Clone)]
pub struct MemorySheetStore {
    id: String,
    sheet: Worksheet,
    writes: Vec<CellWrite>,
    fail_after: Option<usize>,
}

impl MemorySheetStore {
    /// Wrap an existing worksheet; its first row is the header
    pub fn new(sheet: Worksheet) -> Self {
        Self {
            id: format!("memory:{}", sheet.name()),
            sheet,
            writes: Vec::new(),
            fail_after: None,
        }
    }

    /// Build a store from text rows, the first one being the header
    ///
    /// Empty strings leave the cell empty. Fails when the table does not fit
    /// in a sheet.
    pub fn from_rows(rows: &[&[&str]]) -> Result<Self, StoreError> {
        let mut sheet = Worksheet::new("Casos");
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                if !text.is_empty() {
                    // Saturated indices are past the sheet limits and get refused
                    let row = u32::try_from(r).unwrap_or(u32::MAX);
                    let col = u16::try_from(c).unwrap_or(u16::MAX);
                    sheet.set_cell_value_at(row, col, *text)?;
                }
            }
        }
        Ok(Self::new(sheet))
    }

    /// Fail every write after `count` successful ones
    pub fn fail_writes_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }

    /// Writes applied so far, in order
    pub fn writes(&self) -> &[CellWrite] {
        &self.writes
    }

    /// The underlying sheet
    pub fn sheet(&self) -> &Worksheet {
        &self.sheet
    }

    /// Value at a 1-based position
    pub fn value_at(&self, row: u32, col: u16) -> CellValue {
        match CellAddress::from_one_based(row, col) {
            Ok(addr) => self.sheet.get_value_at(addr.row, addr.col),
            Err(_) => CellValue::Empty,
        }
    }
}

impl SheetStore for MemorySheetStore {
    fn document_id(&self) -> &str {
        &self.id
    }

    fn read_records(&self) -> Result<RecordSet, StoreError> {
        Ok(self.sheet.record_set())
    }

    fn write_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), StoreError> {
        if let Some(limit) = self.fail_after {
            if self.writes.len() >= limit {
                return Err(StoreError::Unavailable(format!(
                    "write quota exhausted after {limit} writes"
                )));
            }
        }

        let addr = CellAddress::from_one_based(row, col)?;
        self.sheet
            .set_cell_value_at(addr.row, addr.col, value.clone())?;
        self.writes.push(CellWrite { row, col, value });
        Ok(())
    }
}

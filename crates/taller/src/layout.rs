//! Where ticket fields live in the sheet

use serde::Deserialize;

/// Rows between a record's position and its sheet row: one for the header,
/// one because sheet rows count from 1.
pub const HEADER_OFFSET: u32 = 2;

/// Header names of the columns the editor reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub ticket_id: String,
    pub customer: String,
    pub phone: String,
    pub equipment: String,
    pub accessories: String,
    pub problem: String,
    pub status: String,
    pub diagnosis: String,
    pub parts_detail: String,
    pub total_cost: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            ticket_id: "ID_Caso".to_string(),
            customer: "Cliente".to_string(),
            phone: "Telefono".to_string(),
            equipment: "Equipo".to_string(),
            accessories: "Accesorios".to_string(),
            problem: "Falla".to_string(),
            status: "Estado".to_string(),
            diagnosis: "Informe".to_string(),
            parts_detail: "Repuestos".to_string(),
            total_cost: "Costo_Total".to_string(),
        }
    }
}

/// Header names for reading plus the fixed 1-based columns for writing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub columns: ColumnNames,
    pub status_column: u16,
    pub diagnosis_column: u16,
    pub parts_column: u16,
    pub total_column: u16,
    pub notify_column: u16,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            status_column: 11,
            diagnosis_column: 12,
            parts_column: 13,
            total_column: 14,
            notify_column: 15,
        }
    }
}

impl SheetLayout {
    /// Write columns in the order a save writes them
    pub fn write_columns(&self) -> [u16; 5] {
        [
            self.status_column,
            self.diagnosis_column,
            self.parts_column,
            self.total_column,
            self.notify_column,
        ]
    }

    /// Check that the write columns are usable: 1-based and distinct
    pub fn validate(&self) -> Result<(), String> {
        let columns = self.write_columns();
        if columns.contains(&0) {
            return Err("write columns are 1-based; 0 is not a column".to_string());
        }
        for (i, a) in columns.iter().enumerate() {
            if columns[i + 1..].contains(a) {
                return Err(format!("column {a} is assigned to more than one field"));
            }
        }
        Ok(())
    }
}

/// A 1-based sheet row holding a data record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetRow(u32);

impl SheetRow {
    /// Row for the record at `position` in the record list
    pub fn from_position(position: usize) -> Self {
        SheetRow(position as u32 + HEADER_OFFSET)
    }

    /// Row from a raw 1-based number; the header row and above are refused
    pub fn new(row: u32) -> Option<Self> {
        (row >= HEADER_OFFSET).then_some(SheetRow(row))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Position of the row's record in the record list
    pub fn position(&self) -> usize {
        (self.0 - HEADER_OFFSET) as usize
    }
}

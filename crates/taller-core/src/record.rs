//! Header-keyed records

use ahash::AHashMap;

use crate::cell::CellValue;

/// One data row keyed by its column header
///
/// Header names are trimmed when the record is built, so `" Estado "` in the
/// sheet is found as `"Estado"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: AHashMap<String, CellValue>,
}

impl Record {
    /// Create a record from a header row and the values under it
    ///
    /// Values beyond the last header are dropped. Headers that are blank
    /// after trimming are skipped, and for repeated headers the leftmost
    /// column wins.
    pub fn from_row(headers: &[String], values: Vec<CellValue>) -> Self {
        let mut map = AHashMap::with_capacity(headers.len());
        let mut values = values.into_iter();

        for header in headers {
            let value = values.next().unwrap_or_default();
            let key = header.trim();
            if key.is_empty() {
                continue;
            }
            map.entry(key.to_string()).or_insert(value);
        }

        Self { values: map }
    }

    /// Get the raw value under a column
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column.trim())
    }

    /// Get the value under a column as trimmed display text
    ///
    /// Returns `None` when the column is missing or the cell is blank.
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column)
            .filter(|v| !v.is_blank())
            .map(|v| v.to_string().trim().to_string())
    }

    /// Check whether the record has a column with this name
    pub fn has_column(&self, column: &str) -> bool {
        self.values.contains_key(column.trim())
    }

    /// Number of columns in the record
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no columns
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All data rows of a sheet together with its header row
///
/// `records[i]` is the data row directly below the header at position `i`,
/// blank rows included, so positions map back onto sheet rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    /// Trimmed header names in column order
    pub headers: Vec<String>,
    /// Data rows in sheet order
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Check whether the header row contains a column
    pub fn has_column(&self, column: &str) -> bool {
        let column = column.trim();
        self.headers.iter().any(|h| h == column)
    }

    /// 1-based column number of a header, as the sheet counts it
    pub fn column_number(&self, column: &str) -> Option<u16> {
        let column = column.trim();
        self.headers
            .iter()
            .position(|h| h == column)
            .map(|i| i as u16 + 1)
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no data rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! Store backed by a CSV sheet file

use std::fs;
use std::path::{Path, PathBuf};

use taller_core::{CellAddress, CellValue, RecordSet, Worksheet};
use taller_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use tracing::debug;

use super::SheetStore;
use crate::error::StoreError;

/// A sheet kept as a CSV file on disk
///
/// Every read loads the file again so edits made by other tools are seen.
/// A write changes only the line that holds the cell; the rest of the file
/// is copied byte for byte. Separator and line terminator are taken from the
/// header line when the file is opened and used for any line that is
/// written, so a semicolon CRLF export stays one. Every write is persisted
/// before it returns: a new copy is written next to the file and renamed
/// over it.
#[derive(Debug, Clone)]
pub struct CsvSheetStore {
    path: PathBuf,
    id: String,
    read_options: CsvReadOptions,
    write_options: CsvWriteOptions,
}

impl CsvSheetStore {
    /// Open a sheet file, checking that it can be read
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let write_options = CsvReader::sniff_file(&path)?;
        let store = Self {
            id: path.display().to_string(),
            read_options: CsvReadOptions {
                dialect: write_options.dialect,
                sheet_name: sheet_name(&path),
                ..Default::default()
            },
            write_options,
            path,
        };
        store.load()?;
        Ok(store)
    }

    /// Path of the sheet file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Worksheet, StoreError> {
        Ok(CsvReader::read_file(&self.path, &self.read_options)?)
    }

    fn persist(&self, contents: &[u8]) -> Result<(), StoreError> {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, contents)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

fn sheet_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Sheet1")
        .to_string()
}

impl SheetStore for CsvSheetStore {
    fn document_id(&self) -> &str {
        &self.id
    }

    fn read_records(&self) -> Result<RecordSet, StoreError> {
        Ok(self.load()?.record_set())
    }

    fn write_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), StoreError> {
        let addr = CellAddress::from_one_based(row, col)?;
        let source = fs::read(&self.path)?;
        let updated = CsvWriter::write_cell(&source, addr, &value, &self.write_options)?;
        self.persist(&updated)?;
        debug!(document = %self.id, cell = %addr, "cell written");
        Ok(())
    }
}

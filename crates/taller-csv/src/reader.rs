//! CSV reader

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::{CsvReadOptions, CsvWriteOptions};
use taller_core::{CellValue, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Guess separator and line terminator of a sheet file from its first line
    pub fn sniff_file<P: AsRef<Path>>(path: P) -> CsvResult<CsvWriteOptions> {
        let mut header = String::new();
        BufReader::new(File::open(path)?).read_line(&mut header)?;
        Ok(CsvWriteOptions::sniff(&header))
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Every line becomes a sheet row, the header line included, so the
    /// first line lands in row 0. Ragged lines are accepted.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.dialect.delimiter)
            .quote(options.dialect.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result.map_err(|e| CsvError::malformed(e, row_idx as u64 + 1))?;

            for (col, field) in record.iter().enumerate() {
                // Headers always stay text
                let value = if options.detect_numbers && row_idx > 0 {
                    Self::detect_type(field)
                } else {
                    CellValue::text(field)
                };

                worksheet.set_cell_value_at(row_idx as u32, col as u16, value)?;
            }
        }

        Ok(worksheet)
    }

    /// Detect the type of a field value
    ///
    /// Only plain numerals that print back as the same text become numbers.
    /// Everything else stays text, including `1.50`, `-0`, serial numbers
    /// too long for an `f64`, and fields that hold only spaces.
    fn detect_type(field: &str) -> CellValue {
        if field.is_empty() {
            return CellValue::Empty;
        }

        match field {
            "TRUE" => return CellValue::Boolean(true),
            "FALSE" => return CellValue::Boolean(false),
            _ => {}
        }

        if Self::is_plain_numeral(field) {
            if let Ok(n) = field.parse::<f64>() {
                let number = CellValue::Number(n);
                if number.to_string() == field {
                    return number;
                }
            }
        }

        CellValue::text(field)
    }

    fn is_plain_numeral(field: &str) -> bool {
        let digits = field.strip_prefix('-').unwrap_or(field);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        let int_ok = !int_part.is_empty()
            && int_part.chars().all(|c| c.is_ascii_digit())
            && (int_part == "0" || !int_part.starts_with('0'));
        let frac_ok = frac_part
            .map(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(true);

        int_ok && frac_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dialect, LineTerminator};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type("1500"), CellValue::Number(1500.0));
        assert_eq!(CsvReader::detect_type("-2.5"), CellValue::Number(-2.5));
        assert_eq!(CsvReader::detect_type("0"), CellValue::Number(0.0));
        assert_eq!(CsvReader::detect_type("TRUE"), CellValue::Boolean(true));
        assert_eq!(CsvReader::detect_type(""), CellValue::Empty);
        assert_eq!(CsvReader::detect_type("007"), CellValue::text("007"));
        assert_eq!(
            CsvReader::detect_type("+56912345678"),
            CellValue::text("+56912345678")
        );
        assert_eq!(CsvReader::detect_type("$15.000"), CellValue::text("$15.000"));
        assert_eq!(CsvReader::detect_type("1."), CellValue::text("1."));
    }

    #[test]
    fn test_detect_type_keeps_text_numbers_cannot_reproduce() {
        for field in ["1.50", "-0", "12345678901234567891", "   "] {
            assert_eq!(CsvReader::detect_type(field), CellValue::text(field), "{field:?}");
        }
        assert_eq!(CsvReader::detect_type("0.25"), CellValue::Number(0.25));
    }

    #[test]
    fn test_header_row_stays_text() {
        let data = "ID_Caso,2024\nCASO-1,1500\n";
        let sheet = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(sheet.get_value_at(0, 1), CellValue::text("2024"));
        assert_eq!(sheet.get_value_at(1, 1), CellValue::Number(1500.0));
    }

    #[test]
    fn test_semicolon_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casos.csv");
        std::fs::write(&path, "ID_Caso;Informe\nCASO-1;Limpieza, ajuste\n").unwrap();

        let sniffed = CsvReader::sniff_file(&path).unwrap();
        assert_eq!(sniffed.dialect, Dialect::semicolon());

        let options = CsvReadOptions {
            dialect: sniffed.dialect,
            ..Default::default()
        };
        let sheet = CsvReader::read_file(&path, &options).unwrap();
        assert_eq!(sheet.get_value_at(1, 1), CellValue::text("Limpieza, ajuste"));
    }

    #[test]
    fn test_sniff_crlf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("casos.csv");
        std::fs::write(&path, "ID_Caso,Estado\r\nCASO-1,Ingresado\r\n").unwrap();

        let sniffed = CsvReader::sniff_file(&path).unwrap();
        assert_eq!(sniffed.line_terminator, LineTerminator::CrLf);

        let sheet = CsvReader::read_file(&path, &CsvReadOptions::default()).unwrap();
        assert_eq!(sheet.get_value_at(1, 1), CellValue::text("Ingresado"));
    }

    #[test]
    fn test_ragged_lines() {
        let data = "ID_Caso,Cliente,Estado\nCASO-1\nCASO-2,Ana,Ingresado\n";
        let sheet = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.get_value_at(1, 2), CellValue::Empty);
        assert_eq!(sheet.get_value_at(2, 1), CellValue::text("Ana"));
    }
}

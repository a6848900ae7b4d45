//! CSV writer

use crate::error::{CsvError, CsvResult};
use crate::options::CsvWriteOptions;
use taller_core::{CellAddress, CellValue};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Set one cell of a sheet file held in memory
    ///
    /// Only the line holding the cell is encoded again. Every other byte of
    /// `source` is copied as it was, quoting and line endings included, so
    /// cells nobody wrote keep their exact text. A row past the end of the
    /// file is reached by appending lines, and a short line is padded with
    /// empty fields up to the column.
    pub fn write_cell(
        source: &[u8],
        addr: CellAddress,
        value: &CellValue,
        options: &CsvWriteOptions,
    ) -> CsvResult<Vec<u8>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.dialect.delimiter)
            .quote(options.dialect.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(source);

        let mut record = csv::ByteRecord::new();
        let mut target: Option<(usize, csv::ByteRecord)> = None;
        let mut target_end = source.len();
        let mut rows = 0u32;

        loop {
            let start = reader.position().byte() as usize;
            let more = reader
                .read_byte_record(&mut record)
                .map_err(|e| CsvError::malformed(e, u64::from(rows) + 1))?;
            if !more {
                break;
            }
            if target.is_some() {
                target_end = start;
                break;
            }
            if rows == addr.row {
                target = Some((start, record.clone()));
            }
            rows += 1;
        }

        let text = value.to_string();
        let mut out = Vec::with_capacity(source.len() + text.len() + 16);

        match target {
            Some((start, record)) => {
                // The reader's offsets can sit on either side of a line break
                let span = &source[start..target_end];
                let lead = span.iter().take_while(|b| is_break(b)).count();
                let trail = span[lead..].iter().rev().take_while(|b| is_break(b)).count();
                let body_start = start + lead;
                let body_end = target_end - trail;

                let fields: Vec<&[u8]> = record.iter().collect();
                out.extend_from_slice(&source[..body_start]);
                out.extend(Self::encode_line(&with_cell(fields, addr.col, &text), options)?);
                out.extend_from_slice(&source[body_end..]);
            }
            None => {
                let terminator = options.line_terminator.as_bytes();
                out.extend_from_slice(source);
                if source.last().is_some_and(|b| !is_break(b)) {
                    out.extend_from_slice(terminator);
                }

                // Blank lines are skipped by readers, so filler rows carry
                // empty fields up to the column
                let filler = vec![&b""[..]; usize::from(addr.col) + 1];
                for _ in rows..addr.row {
                    out.extend(Self::encode_line(&filler, options)?);
                    out.extend_from_slice(terminator);
                }
                out.extend(Self::encode_line(&with_cell(Vec::new(), addr.col, &text), options)?);
                out.extend_from_slice(terminator);
            }
        }

        Ok(out)
    }

    /// One CSV line without its terminator
    fn encode_line(fields: &[&[u8]], options: &CsvWriteOptions) -> CsvResult<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(options.dialect.delimiter)
            .quote(options.dialect.quote)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(fields)?;

        let mut line = writer.into_inner().map_err(|e| CsvError::Io(e.into_error()))?;
        line.pop();
        Ok(line)
    }
}

fn is_break(b: &u8) -> bool {
    matches!(b, b'\r' | b'\n')
}

fn with_cell<'a>(mut fields: Vec<&'a [u8]>, col: u16, text: &'a str) -> Vec<&'a [u8]> {
    let col = usize::from(col);
    if fields.len() <= col {
        fields.resize(col + 1, &b""[..]);
    }
    fields[col] = text.as_bytes();
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CsvReadOptions, CsvReader, Dialect, LineTerminator};
    use pretty_assertions::assert_eq;

    fn write(source: &str, cell: &str, value: CellValue, options: &CsvWriteOptions) -> String {
        let addr = CellAddress::parse(cell).unwrap();
        let out = CsvWriter::write_cell(source.as_bytes(), addr, &value, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_other_lines_are_copied_untouched() {
        let source = "ID_Caso,Cliente,Serie,Monto,Estado\n\
                      CASO-7,Ana,A1,100,Ingresado\n\
                      CASO-8,\"Luis\",12345678901234567891,1.50,-0\n";

        let out = write(source, "E2", CellValue::from("Entregado"), &CsvWriteOptions::default());

        assert_eq!(
            out,
            "ID_Caso,Cliente,Serie,Monto,Estado\n\
             CASO-7,Ana,A1,100,Entregado\n\
             CASO-8,\"Luis\",12345678901234567891,1.50,-0\n"
        );
    }

    #[test]
    fn test_short_line_is_padded_and_quoted() {
        let out = write(
            "ID_Caso,Estado\nCASO-1\n",
            "C2",
            CellValue::from("Limpieza, ajuste\n\"urgente\""),
            &CsvWriteOptions::default(),
        );
        assert_eq!(
            out,
            "ID_Caso,Estado\nCASO-1,,\"Limpieza, ajuste\n\"\"urgente\"\"\"\n"
        );
    }

    #[test]
    fn test_crlf_and_semicolon_kept() {
        let options = CsvWriteOptions {
            dialect: Dialect::semicolon(),
            line_terminator: LineTerminator::CrLf,
        };
        let out = write(
            "ID_Caso;Costo_Total\r\nCASO-1;\r\nCASO-2;   \r\n",
            "B2",
            CellValue::from(1500u64),
            &options,
        );
        assert_eq!(out, "ID_Caso;Costo_Total\r\nCASO-1;1500\r\nCASO-2;   \r\n");
    }

    #[test]
    fn test_last_line_without_terminator() {
        let out = write("ID_Caso,Estado\nCASO-1,x", "B2", CellValue::from("y"), &CsvWriteOptions::default());
        assert_eq!(out, "ID_Caso,Estado\nCASO-1,y");
    }

    #[test]
    fn test_rows_past_the_end_are_appended() {
        let out = write("ID_Caso\nCASO-1", "B4", CellValue::from(true), &CsvWriteOptions::default());
        assert_eq!(out, "ID_Caso\nCASO-1\n,\n,TRUE\n");

        let back = CsvReader::read(out.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(back.get_value("B4").unwrap(), CellValue::Boolean(true));
        assert_eq!(back.row_count(), 4);
    }
}

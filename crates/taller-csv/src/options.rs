//! Reading and writing options

/// Field separator and quote character of a sheet file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl Dialect {
    /// Semicolon-separated, as spreadsheet apps export in decimal-comma locales
    pub fn semicolon() -> Self {
        Self {
            delimiter: b';',
            ..Self::default()
        }
    }

    /// Guess the dialect from the header line
    ///
    /// A header with more semicolons than commas is taken as
    /// semicolon-separated; anything else is comma-separated.
    pub fn sniff(header_line: &str) -> Self {
        let count = |sep: char| header_line.chars().filter(|c| *c == sep).count();
        if count(';') > count(',') {
            Self::semicolon()
        } else {
            Self::default()
        }
    }
}

/// Options for reading sheet files
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    pub dialect: Dialect,
    /// Name given to the worksheet
    pub sheet_name: String,
    /// Store plain numerals below the header as numbers instead of text
    pub detect_numbers: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            sheet_name: "Casos".to_string(),
            detect_numbers: true,
        }
    }
}

/// Options for writing sheet files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvWriteOptions {
    pub dialect: Dialect,
    pub line_terminator: LineTerminator,
}

impl CsvWriteOptions {
    /// Options that write the way an existing file was written, guessed from
    /// its first line (terminator included)
    pub fn sniff(first_line: &str) -> Self {
        Self {
            dialect: Dialect::sniff(first_line),
            line_terminator: LineTerminator::sniff(first_line),
        }
    }
}

/// Line terminator written after each row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    #[default]
    Lf,
    CrLf,
}

impl LineTerminator {
    /// `CrLf` when the line ends in `\r\n`, `Lf` otherwise
    pub fn sniff(line: &str) -> Self {
        if line.ends_with("\r\n") {
            LineTerminator::CrLf
        } else {
            LineTerminator::Lf
        }
    }

    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            LineTerminator::Lf => b"\n",
            LineTerminator::CrLf => b"\r\n",
        }
    }
}

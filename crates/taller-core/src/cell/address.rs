//! Cell positions

use std::fmt;

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// Where a cell sits in the sheet
///
/// Stored 0-based. Stores and people count rows and columns from 1, so
/// [`CellAddress::from_one_based`] and [`CellAddress::one_based`] are the
/// only places the offset is applied. Displays in A1 notation (`K2` is the
/// status cell of the first ticket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    /// Address from 0-based indices
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Address from 1-based row and column numbers
    ///
    /// ```
    /// use taller_core::CellAddress;
    ///
    /// let addr = CellAddress::from_one_based(2, 11).unwrap();
    /// assert_eq!(addr.to_string(), "K2");
    /// assert!(CellAddress::from_one_based(0, 1).is_err());
    /// ```
    pub fn from_one_based(row: u32, col: u16) -> Result<Self> {
        if row == 0 || col == 0 {
            return Err(Error::InvalidAddress(format!(
                "row {row}, column {col}: numbering starts at 1"
            )));
        }
        let addr = Self::new(row - 1, col - 1);
        addr.check()?;
        Ok(addr)
    }

    /// The (row, column) pair counted from 1
    pub fn one_based(&self) -> (u32, u16) {
        (self.row + 1, self.col + 1)
    }

    /// Read an A1-style address such as `O15`
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let split = text
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(text.len());
        let (letters, digits) = text.split_at(split);

        if letters.is_empty() || digits.is_empty() {
            return Err(Error::InvalidAddress(format!("'{text}' is not an A1 address")));
        }

        let col = column_index(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("bad row number in '{text}'")))?;

        Self::from_one_based(row, col + 1)
    }

    /// Fail when the address lies outside the sheet limits
    pub(crate) fn check(&self) -> Result<()> {
        if self.row >= MAX_ROWS || self.col >= MAX_COLS {
            return Err(Error::out_of_range(self.row, self.col as u32));
        }
        Ok(())
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row + 1)
    }
}

/// Spreadsheet column name for a 0-based index: 0 is `A`, 26 is `AA`
pub fn column_letters(col: u16) -> String {
    // Bijective base 26: there is no zero digit
    let mut rest = u32::from(col) + 1;
    let mut letters = Vec::new();
    while rest > 0 {
        let digit = (rest - 1) % 26;
        letters.push(b'A' + digit as u8);
        rest = (rest - 1) / 26;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}

/// 0-based index of a column name, case-insensitive
pub fn column_index(letters: &str) -> Result<u16> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("missing column letters".into()));
    }

    let number = letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!("'{c}' is not a column letter")));
        }
        let value = acc * 26 + u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        if value > u32::from(MAX_COLS) {
            return Err(Error::out_of_range(0, value - 1));
        }
        Ok(value)
    })?;

    Ok((number - 1) as u16)
}

//! What a sheet cell holds

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Value of one cell
///
/// Sheet files carry no types, so this is only as precise as the reader
/// makes it: plain numerals become [`CellValue::Number`], everything else
/// that is not blank stays [`CellValue::Text`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,

    /// `TRUE` / `FALSE`
    Boolean(bool),

    /// Amounts are whole numbers, but the cell does not enforce it
    Number(f64),

    Text(SharedString),
}

impl CellValue {
    /// Text cell
    pub fn text<S: AsRef<str>>(s: S) -> Self {
        CellValue::Text(SharedString::new(s))
    }

    /// Nothing stored at all
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Nothing a person would read: empty, or text that is only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// The text a person sees in the cell, which is also what gets written back
/// to a sheet file. Whole numbers print without a fraction (`1500`, not
/// `1500.0`).
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(true) => f.write_str("TRUE"),
            CellValue::Boolean(false) => f.write_str("FALSE"),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

/// Cell text behind an `Arc`
///
/// Records are cloned into tickets and forms; status names and equipment
/// brands repeat down whole columns.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for SharedString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from(1500u64), CellValue::Number(1500.0));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
        assert_eq!(CellValue::from("boquilla").as_text(), Some("boquilla"));
        assert_eq!(CellValue::from(String::from("x")), CellValue::text("x"));
    }

    #[test]
    fn test_as_number_only_reads_numbers() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::text("$15.000").as_number(), None);
        assert_eq!(CellValue::Boolean(true).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(1500.0).to_string(), "1500");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::text("En Revisión").to_string(), "En Revisión");
    }

    #[test]
    fn test_blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("   ").is_blank());
        assert!(!CellValue::text("Entregado").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::text("").is_empty());
    }
}

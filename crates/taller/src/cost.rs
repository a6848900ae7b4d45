//! Itemized costs, the parts-detail text and amount parsing

use taller_core::CellValue;

/// Increment used by the amount inputs of the form
pub const COST_STEP: u64 = 1000;

/// Separator between the segments of the parts detail
pub const SEGMENT_SEPARATOR: &str = " | ";

/// A parts line: what was used and what it cost
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartsLine {
    pub description: String,
    pub value: u64,
}

impl PartsLine {
    pub fn new<S: Into<String>>(description: S, value: u64) -> Self {
        Self {
            description: description.into(),
            value,
        }
    }

    /// A line is written only when it has a value or a description
    pub fn is_present(&self) -> bool {
        self.value > 0 || !self.description.trim().is_empty()
    }

    fn segment(&self, label: &str) -> String {
        let description = self.description.trim();
        if description.is_empty() {
            format!("{label}: {}", format_amount(self.value))
        } else {
            format!("{label}: {description} ({})", format_amount(self.value))
        }
    }
}

/// The four itemized costs of a repair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostSheet {
    /// Parts taken from the shop's own stock
    pub internal: PartsLine,
    /// Parts bought outside
    pub external: PartsLine,
    /// Maintenance labor
    pub maintenance: u64,
    /// Repair labor
    pub repair: u64,
}

impl CostSheet {
    /// Sum of the four itemized values
    pub fn total(&self) -> u64 {
        self.internal
            .value
            .saturating_add(self.external.value)
            .saturating_add(self.maintenance)
            .saturating_add(self.repair)
    }

    /// Human-readable breakdown stored next to the total
    ///
    /// Internal and external segments appear only when present; the labor
    /// segment is always there, zeros included.
    pub fn parts_detail(&self) -> String {
        let mut segments = Vec::with_capacity(3);

        if self.internal.is_present() {
            segments.push(self.internal.segment("Repuestos internos"));
        }
        if self.external.is_present() {
            segments.push(self.external.segment("Repuestos externos"));
        }
        segments.push(format!(
            "Mano de obra: mantención {}, reparación {}",
            format_amount(self.maintenance),
            format_amount(self.repair)
        ));

        segments.join(SEGMENT_SEPARATOR)
    }
}

/// Render an amount the way it appears in the sheet text: `$1500`
///
/// No thousands separator, so the number inside the text stays searchable.
pub fn format_amount(value: u64) -> String {
    format!("${value}")
}

/// Parse an amount typed into the form
///
/// Blank input means zero. Anything other than a non-negative whole number
/// is rejected.
pub fn parse_amount(input: &str) -> Option<u64> {
    let input = input.trim();
    if input.is_empty() {
        return Some(0);
    }
    input.parse().ok()
}

/// Read an amount out of a stored cell
///
/// Numbers are used as they are (negatives clamp to zero). Text is what older
/// rows hold, e.g. `"$15.000"`: the currency sign, spaces and both `.` and `,`
/// are dropped as grouping marks. Text that still is not a number gives zero.
pub fn amount_from_cell(value: &CellValue) -> u64 {
    match value {
        CellValue::Number(n) if n.is_finite() && *n > 0.0 => n.round() as u64,
        CellValue::Text(s) => parse_legacy_amount(s.as_str()).unwrap_or(0),
        _ => 0,
    }
}

fn parse_legacy_amount(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | '.' | ',' | ' ' | '\u{a0}'))
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

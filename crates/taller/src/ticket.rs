//! Ticket identity, status stages and the record view of a ticket row

use std::fmt;

use taller_core::{CellValue, Record};

use crate::cost;
use crate::layout::ColumnNames;

/// Prefix shared by every ticket id
pub const CASE_PREFIX: &str = "CASO-";

/// Token written to the notify column for the downstream notifier
pub const NOTIFY_SENTINEL: &str = "NOTIFICAR";

/// Text shown for intake fields the sheet left empty
pub const PLACEHOLDER: &str = "Sin dato";

/// A ticket key of the form `CASO-<n>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    /// Build the key for a case number
    ///
    /// ```
    /// use taller::TicketId;
    /// assert_eq!(TicketId::from_case(7).as_str(), "CASO-7");
    /// ```
    pub fn from_case(case: u32) -> Self {
        TicketId(format!("{CASE_PREFIX}{case}"))
    }

    /// The key as stored in the sheet
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part of the key
    pub fn case_number(&self) -> Option<u32> {
        self.0.strip_prefix(CASE_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a case number typed by a person or passed in a URL
///
/// Accepts `7`, ` 7 ` and `CASO-7`. Zero is not a case number.
pub fn parse_case_number(input: &str) -> Option<u32> {
    let input = input.trim();
    let digits = input.strip_prefix(CASE_PREFIX).unwrap_or(input);
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

/// Repair stages in workflow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Received at the counter
    #[default]
    Ingresado,
    EnRevision,
    PresupuestoEnviado,
    EsperandoRepuestos,
    EnMantencion,
    ListoParaRetiro,
    Entregado,
}

impl Status {
    /// All stages, in order
    pub const ALL: [Status; 7] = [
        Status::Ingresado,
        Status::EnRevision,
        Status::PresupuestoEnviado,
        Status::EsperandoRepuestos,
        Status::EnMantencion,
        Status::ListoParaRetiro,
        Status::Entregado,
    ];

    /// Label as written in the sheet and shown in the form
    pub fn label(&self) -> &'static str {
        match self {
            Status::Ingresado => "Ingresado",
            Status::EnRevision => "En Revisión",
            Status::PresupuestoEnviado => "Presupuesto/Diagnóstico Enviado",
            Status::EsperandoRepuestos => "Esperando Repuestos",
            Status::EnMantencion => "En Mantención",
            Status::ListoParaRetiro => "Listo para Retiro",
            Status::Entregado => "Entregado",
        }
    }

    /// Exact (trimmed) match against the stage labels
    pub fn from_label(label: &str) -> Option<Status> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }

    /// Stage for a stored cell; blank or unknown text falls back to the first stage
    pub fn from_stored(stored: Option<&str>) -> Status {
        stored.and_then(Self::from_label).unwrap_or_default()
    }

    /// Position in the workflow, 0-based
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields captured at intake; shown, never written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeFields {
    pub customer: Option<String>,
    pub phone: Option<String>,
    pub equipment: Option<String>,
    pub accessories: Option<String>,
    pub problem: Option<String>,
}

impl IntakeFields {
    /// `(label, value)` pairs for display, with the placeholder for gaps
    pub fn display_rows(&self) -> [(&'static str, &str); 5] {
        fn show(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or(PLACEHOLDER)
        }
        [
            ("Cliente", show(&self.customer)),
            ("Teléfono", show(&self.phone)),
            ("Equipo", show(&self.equipment)),
            ("Accesorios", show(&self.accessories)),
            ("Falla reportada", show(&self.problem)),
        ]
    }
}

/// A ticket row as read from the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: TicketId,
    pub intake: IntakeFields,
    /// Stage derived from the stored text
    pub status: Status,
    /// Status text exactly as stored, when not blank
    pub stored_status: Option<String>,
    pub diagnosis: String,
    pub parts_detail: String,
    /// Previously stored total, whatever shape it was written in
    pub stored_total: CellValue,
}

impl Ticket {
    /// Extract a ticket from a record using the configured header names
    pub fn from_record(id: TicketId, record: &Record, columns: &ColumnNames) -> Self {
        let stored_status = record.text(&columns.status);
        Self {
            id,
            intake: IntakeFields {
                customer: record.text(&columns.customer),
                phone: record.text(&columns.phone),
                equipment: record.text(&columns.equipment),
                accessories: record.text(&columns.accessories),
                problem: record.text(&columns.problem),
            },
            status: Status::from_stored(stored_status.as_deref()),
            stored_status,
            diagnosis: record.text(&columns.diagnosis).unwrap_or_default(),
            parts_detail: record.text(&columns.parts_detail).unwrap_or_default(),
            stored_total: record
                .get(&columns.total_cost)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Stored total as an amount, used to seed the repair input
    pub fn stored_total_amount(&self) -> u64 {
        cost::amount_from_cell(&self.stored_total)
    }
}

//! Edit state: the form built from a ticket and the edits submitted back

use crate::cost::{CostSheet, PartsLine};
use crate::editor::LookupHit;
use crate::layout::SheetRow;
use crate::ticket::{IntakeFields, Status, TicketId, NOTIFY_SENTINEL};

/// Marks where the work-performed note starts inside the stored diagnosis
pub const WORK_NOTE_DELIMITER: &str = "\n\n--- Trabajo realizado ---\n";

/// Everything a save writes, as one explicit payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketEdits {
    pub status: Status,
    pub costs: CostSheet,
    pub diagnosis: String,
    /// Internal note about the work done; appended to the diagnosis when set
    pub work_note: String,
    /// Ask the downstream process to contact the customer
    pub notify: bool,
}

impl TicketEdits {
    /// Total recomputed from the itemized values
    pub fn total(&self) -> u64 {
        self.costs.total()
    }

    pub fn parts_detail(&self) -> String {
        self.costs.parts_detail()
    }

    /// Diagnosis as stored: the edited text, plus the note after the delimiter
    pub fn diagnosis_text(&self) -> String {
        let note = self.work_note.trim();
        if note.is_empty() {
            self.diagnosis.clone()
        } else {
            format!("{}{WORK_NOTE_DELIMITER}{note}", self.diagnosis)
        }
    }

    /// Value for the notify column
    pub fn notify_marker(&self) -> &'static str {
        if self.notify {
            NOTIFY_SENTINEL
        } else {
            ""
        }
    }
}

/// The pending edit state shown for one ticket
///
/// Built fresh from the sheet on every lookup; nothing is carried over
/// between requests except what the sheet holds.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub ticket_id: TicketId,
    pub row: SheetRow,
    pub intake: IntakeFields,
    /// Stored status text that did not match a stage, if any
    pub unrecognized_status: Option<String>,
    /// Breakdown text currently in the sheet, for reference
    pub current_parts_detail: String,
    pub edits: TicketEdits,
}

impl EditForm {
    /// Pre-fill the form from a lookup
    ///
    /// The repair amount starts at the stored total so that a total entered
    /// without a breakdown is not lost when the ticket is saved again.
    pub fn from_hit(hit: &LookupHit) -> Self {
        let ticket = &hit.ticket;
        let unrecognized_status = ticket
            .stored_status
            .as_deref()
            .filter(|s| Status::from_label(s).is_none())
            .map(str::to_string);

        Self {
            ticket_id: ticket.id.clone(),
            row: hit.row(),
            intake: ticket.intake.clone(),
            unrecognized_status,
            current_parts_detail: ticket.parts_detail.clone(),
            edits: TicketEdits {
                status: ticket.status,
                costs: CostSheet {
                    internal: PartsLine::default(),
                    external: PartsLine::default(),
                    maintenance: 0,
                    repair: ticket.stored_total_amount(),
                },
                diagnosis: ticket.diagnosis.clone(),
                work_note: String::new(),
                notify: false,
            },
        }
    }

    /// Total of the current inputs
    pub fn live_total(&self) -> u64 {
        self.edits.total()
    }

    /// Stages with the pre-selected one flagged
    pub fn status_options(&self) -> impl Iterator<Item = (Status, bool)> + '_ {
        Status::ALL
            .into_iter()
            .map(move |s| (s, s == self.edits.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnosis_with_and_without_note() {
        let mut edits = TicketEdits {
            diagnosis: "Pantalla quebrada".into(),
            ..Default::default()
        };
        assert_eq!(edits.diagnosis_text(), "Pantalla quebrada");

        edits.work_note = "  ".into();
        assert_eq!(edits.diagnosis_text(), "Pantalla quebrada");

        edits.work_note = "Se cambió el display".into();
        assert_eq!(
            edits.diagnosis_text(),
            "Pantalla quebrada\n\n--- Trabajo realizado ---\nSe cambió el display"
        );
    }

    #[test]
    fn test_notify_marker() {
        let mut edits = TicketEdits::default();
        assert_eq!(edits.notify_marker(), "");
        edits.notify = true;
        assert_eq!(edits.notify_marker(), "NOTIFICAR");
    }
}

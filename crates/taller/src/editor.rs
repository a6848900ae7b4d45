//! The ticket editor workflow: lookup, edit form, save

use taller_core::{CellValue, Record};
use tracing::{debug, info, warn};

use crate::error::{EditorError, Result};
use crate::form::{EditForm, TicketEdits};
use crate::layout::{SheetLayout, SheetRow};
use crate::store::SheetStore;
use crate::ticket::{Ticket, TicketId};

/// Number of cells a successful save writes
pub const WRITES_PER_SAVE: usize = 5;

/// A ticket found in the sheet, with its position among the data rows
#[derive(Debug, Clone, PartialEq)]
pub struct LookupHit {
    pub ticket: Ticket,
    /// 0-based position in the record list
    pub position: usize,
}

impl LookupHit {
    /// Sheet row the ticket lives in
    pub fn row(&self) -> SheetRow {
        SheetRow::from_position(self.position)
    }
}

/// What a completed save wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub ticket_id: TicketId,
    pub row: SheetRow,
    pub total: u64,
    pub notified: bool,
    pub writes: usize,
}

/// Looks tickets up in a store and writes edits back
#[derive(Debug)]
pub struct TicketEditor<S> {
    store: S,
    layout: SheetLayout,
}

impl<S: SheetStore> TicketEditor<S> {
    pub fn new(store: S, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Find the ticket for a case number
    pub fn lookup(&self, case: u32) -> Result<LookupHit> {
        self.find(&TicketId::from_case(case))
    }

    /// Find a ticket by id; the first matching row wins
    pub fn find(&self, id: &TicketId) -> Result<LookupHit> {
        let set = self.store.read_records().map_err(EditorError::Read)?;
        let key_column = &self.layout.columns.ticket_id;

        if !set.has_column(key_column) {
            warn!(column = %key_column, document = %self.store.document_id(), "key column missing");
            return Err(EditorError::MissingColumn(key_column.trim().to_string()));
        }

        let hit = set
            .records
            .iter()
            .position(|record| holds(record, key_column, id));

        match hit {
            Some(position) => {
                let ticket = Ticket::from_record(
                    id.clone(),
                    &set.records[position],
                    &self.layout.columns,
                );
                debug!(ticket = %id, position, "ticket found");
                Ok(LookupHit { ticket, position })
            }
            None => {
                debug!(ticket = %id, rows = set.len(), "ticket not found");
                Err(EditorError::NotFound(id.clone()))
            }
        }
    }

    /// Look a ticket up and build its edit form
    pub fn open_form(&self, case: u32) -> Result<EditForm> {
        Ok(EditForm::from_hit(&self.lookup(case)?))
    }

    /// Write the edits to the ticket's row
    ///
    /// The row must still hold the ticket; if rows moved since the form was
    /// opened nothing is written. Five cells are then written one after the
    /// other: status, diagnosis, parts detail, total and notify marker. The
    /// first failure stops the save and leaves the earlier cells as written.
    pub fn save(
        &mut self,
        ticket_id: &TicketId,
        row: SheetRow,
        edits: &TicketEdits,
    ) -> Result<SaveReceipt> {
        self.check_row(ticket_id, row)?;

        let total = edits.total();
        let values = [
            CellValue::from(edits.status.label()),
            CellValue::from(edits.diagnosis_text()),
            CellValue::from(edits.parts_detail()),
            CellValue::from(total),
            CellValue::from(edits.notify_marker()),
        ];

        for (completed, (column, value)) in self
            .layout
            .write_columns()
            .into_iter()
            .zip(values)
            .enumerate()
        {
            self.store
                .write_cell(row.get(), column, value)
                .map_err(|source| {
                    warn!(
                        ticket = %ticket_id,
                        row = row.get(),
                        column,
                        completed,
                        error = %source,
                        "save aborted"
                    );
                    EditorError::Write {
                        row: row.get(),
                        column,
                        completed,
                        source,
                    }
                })?;
            debug!(ticket = %ticket_id, row = row.get(), column, "cell written");
        }

        info!(
            ticket = %ticket_id,
            row = row.get(),
            total,
            notify = edits.notify,
            status = %edits.status,
            "ticket saved"
        );

        Ok(SaveReceipt {
            ticket_id: ticket_id.clone(),
            row,
            total,
            notified: edits.notify,
            writes: WRITES_PER_SAVE,
        })
    }

    fn check_row(&self, ticket_id: &TicketId, row: SheetRow) -> Result<()> {
        let set = self.store.read_records().map_err(EditorError::Read)?;
        let key_column = &self.layout.columns.ticket_id;
        let record = set.records.get(row.position());

        if record.is_some_and(|r| holds(r, key_column, ticket_id)) {
            return Ok(());
        }

        let found = record.and_then(|r| r.text(key_column));
        warn!(ticket = %ticket_id, row = row.get(), found = ?found, "row no longer holds the ticket");
        Err(EditorError::RowMismatch {
            ticket: ticket_id.clone(),
            row: row.get(),
            found,
        })
    }

    /// Save the edits of a form, then read the ticket back
    pub fn save_form(&mut self, form: &EditForm) -> Result<(SaveReceipt, LookupHit)> {
        let receipt = self.save(&form.ticket_id, form.row, &form.edits)?;
        let fresh = self.find(&form.ticket_id)?;
        Ok((receipt, fresh))
    }
}

fn holds(record: &Record, key_column: &str, id: &TicketId) -> bool {
    matches!(record.get(key_column), Some(v) if v.to_string() == id.as_str())
}

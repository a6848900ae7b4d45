//! End-to-end tests for the lookup -> edit -> save workflow

use pretty_assertions::assert_eq;
use taller::prelude::*;
use taller::store::CellWrite;

const HEADER: &[&str] = &[
    "ID_Caso",
    "Cliente",
    "Telefono",
    "Equipo",
    "Accesorios",
    "Falla",
    "Fecha",
    "Tecnico",
    "Sucursal",
    "Garantia",
    "Estado",
    "Informe",
    "Repuestos",
    "Costo_Total",
    "Notificar",
];

fn row7() -> Vec<&'static str> {
    let mut row = vec!["CASO-7", "Ana Rojas", "", "Secador Philips", "", "No enciende"];
    row.extend(["", "", "", "", "Ingresado", "", "", "", ""]);
    row
}

fn store_with(rows: &[Vec<&'static str>]) -> MemorySheetStore {
    let mut all: Vec<&[&str]> = vec![HEADER];
    all.extend(rows.iter().map(|r| r.as_slice()));
    MemorySheetStore::from_rows(&all).unwrap()
}

fn editor(store: MemorySheetStore) -> TicketEditor<MemorySheetStore> {
    TicketEditor::new(store, SheetLayout::default())
}

#[test]
fn test_save_scenario_writes_five_cells() {
    let mut editor = editor(store_with(&[row7()]));

    let mut form = editor.open_form(7).unwrap();
    assert_eq!(form.ticket_id.as_str(), "CASO-7");
    assert_eq!(form.edits.status, Status::Ingresado);
    assert_eq!(form.intake.customer.as_deref(), Some("Ana Rojas"));
    assert_eq!(form.intake.phone, None);

    form.edits.costs.internal = PartsLine::new("boquilla", 1000);
    form.edits.costs.external = PartsLine::default();
    form.edits.costs.maintenance = 500;
    form.edits.costs.repair = 0;
    form.edits.status = Status::Entregado;
    form.edits.notify = true;
    form.edits.diagnosis = "Motor sucio".to_string();

    let receipt = editor.save(&form.ticket_id, form.row, &form.edits).unwrap();
    assert_eq!(receipt.total, 1500);
    assert_eq!(receipt.writes, 5);
    assert_eq!(receipt.row.get(), 2);

    let writes = editor.store().writes();
    let positions: Vec<(u32, u16)> = writes.iter().map(|w| (w.row, w.col)).collect();
    assert_eq!(positions, vec![(2, 11), (2, 12), (2, 13), (2, 14), (2, 15)]);

    assert_eq!(writes[0].value, CellValue::text("Entregado"));
    assert_eq!(writes[1].value, CellValue::text("Motor sucio"));
    let detail = writes[2].value.to_string();
    assert!(detail.contains("boquilla"));
    assert!(detail.contains("1000"));
    assert!(detail.contains("Mano de obra: mantención $500, reparación $0"));
    assert!(!detail.contains("externos"));
    assert_eq!(writes[3].value, CellValue::Number(1500.0));
    assert_eq!(writes[4].value, CellValue::text("NOTIFICAR"));
}

#[test]
fn test_missing_ticket_is_not_found_and_writes_nothing() {
    let editor = editor(store_with(&[row7()]));

    let err = editor.lookup(999).unwrap_err();
    assert!(matches!(&err, EditorError::NotFound(id) if id.as_str() == "CASO-999"));
    assert!(err.is_recoverable());
    assert!(editor.store().writes().is_empty());
}

#[test]
fn test_missing_key_column_is_distinct_from_not_found() {
    let store = MemorySheetStore::from_rows(&[&["Caso", "Estado"], &["CASO-7", "Ingresado"]]).unwrap();
    let editor = editor(store);

    let err = editor.lookup(7).unwrap_err();
    assert!(matches!(err, EditorError::MissingColumn(ref c) if c == "ID_Caso"));
    assert!(!err.is_recoverable());
}

#[test]
fn test_header_whitespace_is_tolerated() {
    let store = MemorySheetStore::from_rows(&[
        &[" ID_Caso ", "Estado  "],
        &["CASO-3", "En Mantención"],
    ]).unwrap();
    let hit = editor(store).lookup(3).unwrap();
    assert_eq!(hit.ticket.status, Status::EnMantencion);
}

#[test]
fn test_row_is_position_plus_two() {
    let mut other = row7();
    other[0] = "CASO-1";
    let mut blank = row7();
    blank[0] = "";
    let mut target = row7();
    target[0] = "CASO-12";

    let mut editor = editor(store_with(&[other, blank, target]));
    let hit = editor.lookup(12).unwrap();
    assert_eq!(hit.position, 2);
    assert_eq!(hit.row().get(), 4);

    let form = EditForm::from_hit(&hit);
    editor.save(&form.ticket_id, form.row, &form.edits).unwrap();
    assert!(editor.store().writes().iter().all(|w| w.row == 4));
}

#[test]
fn test_first_duplicate_wins() {
    let first = row7();
    let mut second = row7();
    second[1] = "Otro Cliente";

    let hit = editor(store_with(&[first, second])).lookup(7).unwrap();
    assert_eq!(hit.position, 0);
    assert_eq!(hit.ticket.intake.customer.as_deref(), Some("Ana Rojas"));
}

#[test]
fn test_unknown_status_preselects_first_stage() {
    let mut row = row7();
    row[10] = "Archivado";
    let form = editor(store_with(&[row])).open_form(7).unwrap();

    assert_eq!(form.edits.status, Status::Ingresado);
    assert_eq!(form.unrecognized_status.as_deref(), Some("Archivado"));
    let selected: Vec<_> = form.status_options().filter(|(_, on)| *on).collect();
    assert_eq!(selected, vec![(Status::Ingresado, true)]);
}

#[test]
fn test_stored_total_seeds_repair_amount() {
    let mut row = row7();
    row[13] = "$15.000";
    let form = editor(store_with(&[row])).open_form(7).unwrap();

    assert_eq!(form.edits.costs.repair, 15000);
    assert_eq!(form.live_total(), 15000);
}

#[test]
fn test_saved_total_reads_back_as_number() {
    let mut editor = editor(store_with(&[row7()]));
    let mut form = editor.open_form(7).unwrap();
    form.edits.costs.repair = 20000;
    form.edits.costs.maintenance = 5000;

    let (receipt, fresh) = editor.save_form(&form).unwrap();
    assert_eq!(receipt.total, 25000);
    assert_eq!(fresh.ticket.stored_total, CellValue::Number(25000.0));

    // Re-opening seeds repair with the whole previous total
    let again = EditForm::from_hit(&fresh);
    assert_eq!(again.edits.costs.repair, 25000);
    assert_eq!(again.edits.costs.maintenance, 0);
}

#[test]
fn test_failed_write_keeps_earlier_cells() {
    let store = store_with(&[row7()]).fail_writes_after(2);
    let mut editor = editor(store);
    let mut form = editor.open_form(7).unwrap();
    form.edits.status = Status::EnRevision;
    form.edits.notify = true;

    let err = editor
        .save(&form.ticket_id, form.row, &form.edits)
        .unwrap_err();
    match err {
        EditorError::Write {
            row,
            column,
            completed,
            ..
        } => {
            assert_eq!((row, column, completed), (2, 13, 2));
        }
        other => panic!("expected write error, got {other:?}"),
    }

    let writes: &[CellWrite] = editor.store().writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(editor.store().value_at(2, 11), CellValue::text("En Revisión"));
    assert_eq!(editor.store().value_at(2, 15), CellValue::Empty);
}

#[test]
fn test_notify_off_clears_flag() {
    let mut row = row7();
    row[14] = "NOTIFICAR";
    let mut editor = editor(store_with(&[row]));
    let form = editor.open_form(7).unwrap();

    editor.save(&form.ticket_id, form.row, &form.edits).unwrap();
    assert_eq!(editor.store().writes()[4].value, CellValue::text(""));
}

#[test]
fn test_save_refuses_row_that_moved() {
    let mut other = row7();
    other[0] = "CASO-12";
    let mut editor = editor(store_with(&[row7(), other]));
    let form = editor.open_form(12).unwrap();
    assert_eq!(form.row.get(), 3);

    // Someone else reuses the row before the save lands
    editor
        .store_mut()
        .write_cell(3, 1, CellValue::from("CASO-13"))
        .unwrap();

    let err = editor
        .save(&form.ticket_id, form.row, &form.edits)
        .unwrap_err();
    match &err {
        EditorError::RowMismatch { ticket, row, found } => {
            assert_eq!(ticket.as_str(), "CASO-12");
            assert_eq!(*row, 3);
            assert_eq!(found.as_deref(), Some("CASO-13"));
        }
        other => panic!("expected row mismatch, got {other:?}"),
    }
    assert!(err.is_recoverable());
    assert_eq!(editor.store().writes().len(), 1);

    // A row past the data is refused the same way
    let stale = SheetRow::new(9).unwrap();
    assert!(matches!(
        editor.save(&form.ticket_id, stale, &form.edits),
        Err(EditorError::RowMismatch { found: None, .. })
    ));
    assert_eq!(editor.store().writes().len(), 1);
}

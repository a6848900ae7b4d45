//! Router tests driven through `tower::ServiceExt::oneshot`

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use taller::store::CellWrite;
use taller::{
    CellValue, MemorySheetStore, RecordSet, SheetLayout, SheetStore, StoreError, TicketEditor,
};
use taller_web::{router, AccessGate, AppState};
use tower::ServiceExt;

/// Memory store the test keeps a handle on after the router owns the editor
#[derive(Clone)]
struct SharedStore(Arc<Mutex<MemorySheetStore>>);

impl SharedStore {
    fn writes(&self) -> Vec<CellWrite> {
        self.0.lock().unwrap().writes().to_vec()
    }
}

impl SheetStore for SharedStore {
    fn document_id(&self) -> &str {
        "memoria"
    }

    fn read_records(&self) -> Result<RecordSet, StoreError> {
        self.0.lock().unwrap().read_records()
    }

    fn write_cell(&mut self, row: u32, col: u16, value: CellValue) -> Result<(), StoreError> {
        self.0.lock().unwrap().write_cell(row, col, value)
    }
}

fn memory_store() -> MemorySheetStore {
    MemorySheetStore::from_rows(&[
        &[
            "ID_Caso", "Cliente", "Telefono", "Equipo", "Accesorios", "Falla", "Fecha",
            "Tecnico", "Sucursal", "Garantia", "Estado", "Informe", "Repuestos",
            "Costo_Total", "Notificar",
        ],
        &[
            "CASO-7", "Ana Rojas", "", "Secador", "", "No enciende", "", "", "", "",
            "Ingresado", "", "", "", "",
        ],
    ]).unwrap()
}

fn app_with(store: MemorySheetStore, gate: AccessGate) -> (Router, SharedStore) {
    let shared = SharedStore(Arc::new(Mutex::new(store)));
    let editor = TicketEditor::new(shared.clone(), SheetLayout::default());
    let state = AppState::new(editor, gate).with_confirm_seconds(2);
    (router(Arc::new(state)), shared)
}

fn app() -> (Router, SharedStore) {
    app_with(memory_store(), AccessGate::open())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const SAVE_BODY: &str = "fila=2&estado=Entregado&interno_desc=boquilla&interno_valor=1000\
&externo_desc=&externo_valor=0&mantencion=500&reparacion=0&informe=\
&trabajo=Cambio+de+boquilla&notificar=1";

#[tokio::test]
async fn test_search_page() {
    let (app, _) = app();
    let (status, _, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"caso\""));
}

#[tokio::test]
async fn test_search_redirects_to_ticket() {
    let (app, _) = app();
    let (status, headers, _) = send(&app, get("/?caso=7")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/ticket/7");
}

#[tokio::test]
async fn test_search_rejects_non_numeric_input() {
    let (app, _) = app();
    let (status, _, body) = send(&app, get("/?caso=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("número de caso válido"));
}

#[tokio::test]
async fn test_ticket_form() {
    let (app, _) = app();
    let (status, _, body) = send(&app, get("/ticket/7")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Caso CASO-7"));
    assert!(body.contains("Ana Rojas"));
    assert!(body.contains("Sin dato"));
    assert!(body.contains("<option value=\"Ingresado\" selected>"));
}

#[tokio::test]
async fn test_unknown_ticket_is_not_found() {
    let (app, store) = app();
    let (status, _, body) = send(&app, get("/ticket/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No se encontró el caso CASO-999"));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_save_writes_five_cells_and_confirms() {
    let (app, store) = app();
    let (status, _, body) = send(&app, post_form("/ticket/7", SAVE_BODY)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Total: $1500"));
    assert!(body.contains("content=\"2;url=/ticket/7\""));

    let writes = store.writes();
    assert_eq!(
        writes.iter().map(|w| (w.row, w.col)).collect::<Vec<_>>(),
        vec![(2, 11), (2, 12), (2, 13), (2, 14), (2, 15)]
    );
    assert_eq!(writes[0].value, CellValue::text("Entregado"));
    assert_eq!(
        writes[1].value,
        CellValue::text("\n\n--- Trabajo realizado ---\nCambio de boquilla")
    );
    assert_eq!(
        writes[2].value,
        CellValue::text(
            "Repuestos internos: boquilla ($1000) | Mano de obra: mantención $500, reparación $0"
        )
    );
    assert_eq!(writes[3].value, CellValue::Number(1500.0));
    assert_eq!(writes[4].value, CellValue::text("NOTIFICAR"));
}

#[tokio::test]
async fn test_saved_ticket_reloads_with_new_values() {
    let (app, _) = app();
    send(&app, post_form("/ticket/7", SAVE_BODY)).await;

    let (status, _, body) = send(&app, get("/ticket/7")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<option value=\"Entregado\" selected>"));
    assert!(body.contains("name=\"reparacion\" type=\"number\" min=\"0\" step=\"1\" data-step=\"1000\" value=\"1500\""));
}

#[tokio::test]
async fn test_invalid_amount_is_rejected_without_writes() {
    let (app, store) = app();
    let body = SAVE_BODY.replace("mantencion=500", "mantencion=quinientos");
    let (status, _, page) = send(&app, post_form("/ticket/7", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(page.contains("Monto inválido"));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_failed_write_keeps_submitted_edits() {
    let (app, store) = app_with(memory_store().fail_writes_after(2), AccessGate::open());
    let (status, _, body) = send(&app, post_form("/ticket/7", SAVE_BODY)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("No se pudieron guardar los cambios"));
    assert!(body.contains(">Cambio de boquilla</textarea>"));
    assert!(body.contains(" checked"));
    assert_eq!(store.writes().len(), 2);
}

#[tokio::test]
async fn test_save_to_a_moved_row_writes_nothing() {
    let (app, store) = app();
    let body = SAVE_BODY.replace("fila=2", "fila=3");
    let (status, _, page) = send(&app, post_form("/ticket/7", &body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(page.contains("La planilla cambió"));
    // Form is shown again at the ticket's current row, edits kept
    assert!(page.contains("name=\"fila\" value=\"2\""));
    assert!(page.contains(">Cambio de boquilla</textarea>"));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn test_gate_redirects_then_admits_with_cookie() {
    let (app, _) = app_with(memory_store(), AccessGate::new(Some("clave-taller".into())));

    let (status, headers, _) = send(&app, get("/ticket/7")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/acceso");

    let (status, _, _) = send(&app, get("/acceso")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) = send(&app, post_form("/acceso", "clave=otra")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Clave incorrecta"));

    let (status, headers, _) = send(&app, post_form("/acceso", "clave=clave-taller")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let cookie = headers[header::SET_COOKIE].to_str().unwrap();
    let pair = cookie.split(';').next().unwrap().to_string();

    let request = Request::builder()
        .uri("/ticket/7")
        .header(header::COOKIE, pair)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ana Rojas"));
}

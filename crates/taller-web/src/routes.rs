//! Routes: search, ticket form, save and the access gate

use std::sync::{Arc, PoisonError};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::SET_COOKIE, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use taller::cost::{parse_amount, CostSheet, PartsLine};
use taller::ticket::parse_case_number;
use taller::{EditForm, EditorError, SheetRow, Status, TicketEditor, TicketEdits, TicketId};
use tracing::{error, info, warn};

use crate::render::{self, Notice};
use crate::server::{AppState, BoxedStore};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Ticket Routes
// ============================================================================

pub fn ticket_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", get(search))
        .route("/ticket/:caso", get(show_ticket).post(save_ticket))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    caso: Option<String>,
}

async fn search(Query(query): Query<SearchQuery>) -> Response {
    let Some(input) = query.caso.filter(|c| !c.trim().is_empty()) else {
        return Html(render::search_page("", None)).into_response();
    };

    match parse_case_number(&input) {
        Some(case) => Redirect::to(&format!("/ticket/{case}")).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Html(render::search_page(&input, Some(&invalid_case_notice()))),
        )
            .into_response(),
    }
}

async fn show_ticket(State(state): State<AppStateArc>, Path(caso): Path<String>) -> Response {
    let Some(case) = parse_case_number(&caso) else {
        return bad_request(invalid_case_notice());
    };

    match with_editor(&state, move |editor| editor.open_form(case)).await {
        Ok(Ok(form)) => Html(render::form_page(&form, None)).into_response(),
        Ok(Err(err)) => editor_error_page(&err),
        Err(response) => response,
    }
}

/// Fields posted by the edit form
#[derive(Debug, Deserialize)]
pub struct SaveForm {
    fila: u32,
    estado: String,
    #[serde(default)]
    interno_desc: String,
    #[serde(default)]
    interno_valor: String,
    #[serde(default)]
    externo_desc: String,
    #[serde(default)]
    externo_valor: String,
    #[serde(default)]
    mantencion: String,
    #[serde(default)]
    reparacion: String,
    #[serde(default)]
    informe: String,
    #[serde(default)]
    trabajo: String,
    /// Present only when the box is ticked
    notificar: Option<String>,
}

impl SaveForm {
    /// Validate the posted values into the save payload
    fn edits(&self) -> Result<(SheetRow, TicketEdits), Notice> {
        let row = SheetRow::new(self.fila)
            .ok_or_else(|| Notice::error(format!("Fila inválida: {}", self.fila)))?;
        let status = Status::from_label(&self.estado)
            .ok_or_else(|| Notice::error(format!("Estado desconocido: {}", self.estado)))?;

        let amount = |label: &str, input: &str| {
            parse_amount(input)
                .ok_or_else(|| Notice::error(format!("Monto inválido en {label}: {input}")))
        };

        let costs = CostSheet {
            internal: PartsLine::new(
                self.interno_desc.trim(),
                amount("repuestos internos", &self.interno_valor)?,
            ),
            external: PartsLine::new(
                self.externo_desc.trim(),
                amount("repuestos externos", &self.externo_valor)?,
            ),
            maintenance: amount("mantención", &self.mantencion)?,
            repair: amount("reparación", &self.reparacion)?,
        };

        Ok((
            row,
            TicketEdits {
                status,
                costs,
                diagnosis: self.informe.clone(),
                work_note: self.trabajo.clone(),
                notify: self.notificar.is_some(),
            },
        ))
    }
}

async fn save_ticket(
    State(state): State<AppStateArc>,
    Path(caso): Path<String>,
    Form(posted): Form<SaveForm>,
) -> Response {
    let Some(case) = parse_case_number(&caso) else {
        return bad_request(invalid_case_notice());
    };
    let (row, edits) = match posted.edits() {
        Ok(parsed) => parsed,
        Err(notice) => return bad_request(notice),
    };
    let ticket_id = TicketId::from_case(case);

    let outcome = with_editor(&state, move |editor| {
        match editor.save(&ticket_id, row, &edits) {
            Ok(receipt) => Ok(receipt),
            // Show the form again with what was submitted
            Err(err) => {
                let form = editor.open_form(case).ok().map(|mut form| {
                    form.edits = edits;
                    form
                });
                Err((err, form))
            }
        }
    })
    .await;

    match outcome {
        Ok(Ok(receipt)) => {
            info!(ticket = %receipt.ticket_id, total = receipt.total, "save confirmed");
            Html(render::saved_page(&receipt, state.confirm_seconds)).into_response()
        }
        Ok(Err((err, form))) => failed_save_page(&err, form),
        Err(response) => response,
    }
}

fn failed_save_page(err: &EditorError, form: Option<EditForm>) -> Response {
    let Some(form) = form else {
        return editor_error_page(err);
    };

    let (status, notice) = match err {
        // The form now carries the ticket's current row
        EditorError::RowMismatch { .. } => (
            StatusCode::CONFLICT,
            Notice::warning(format!(
                "La planilla cambió mientras editabas; revisa y guarda otra vez. ({err})"
            )),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Notice::error(format!("No se pudieron guardar los cambios: {err}")),
        ),
    };
    (status, Html(render::form_page(&form, Some(&notice)))).into_response()
}

// ============================================================================
// Gate Routes
// ============================================================================

pub fn gate_routes() -> Router<AppStateArc> {
    Router::new().route("/acceso", get(login_page).post(login))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    clave: String,
}

async fn login_page() -> Html<String> {
    Html(render::login_page(false))
}

async fn login(State(state): State<AppStateArc>, Form(form): Form<LoginForm>) -> Response {
    if !state.gate.check(&form.clave) {
        warn!("access denied");
        return (StatusCode::UNAUTHORIZED, Html(render::login_page(true))).into_response();
    }

    match state.gate.grant_cookie() {
        Some(cookie) => ([(SET_COOKIE, cookie)], Redirect::to("/")).into_response(),
        None => Redirect::to("/").into_response(),
    }
}

/// Send requests without the access cookie to the login page
pub async fn require_access(
    State(state): State<AppStateArc>,
    request: Request,
    next: Next,
) -> Response {
    if state.gate.admits(request.headers()) {
        next.run(request).await
    } else {
        Redirect::to("/acceso").into_response()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Run editor work on the blocking pool, holding the editor lock
async fn with_editor<T, F>(state: &AppState, work: F) -> Result<T, Response>
where
    F: FnOnce(&mut TicketEditor<BoxedStore>) -> T + Send + 'static,
    T: Send + 'static,
{
    let editor = Arc::clone(&state.editor);
    tokio::task::spawn_blocking(move || {
        let mut editor = editor.lock().unwrap_or_else(PoisonError::into_inner);
        work(&mut editor)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "editor task failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render::error_page(&Notice::error("Error interno del servidor"))),
        )
            .into_response()
    })
}

fn invalid_case_notice() -> Notice {
    Notice::warning("Ingresa un número de caso válido")
}

fn bad_request(notice: Notice) -> Response {
    (StatusCode::BAD_REQUEST, Html(render::error_page(&notice))).into_response()
}

fn editor_error_page(err: &EditorError) -> Response {
    let (status, notice) = match err {
        EditorError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Notice::warning(format!("No se encontró el caso {id}")),
        ),
        EditorError::MissingColumn(column) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Notice::error(format!("La planilla no tiene la columna «{column}»")),
        ),
        EditorError::Connection(_) | EditorError::Read(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Notice::error(format!("No se pudo conectar con la planilla: {err}")),
        ),
        EditorError::RowMismatch { .. } => (
            StatusCode::CONFLICT,
            Notice::warning(format!("No se guardó nada: {err}")),
        ),
        EditorError::Write { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Notice::error(format!("No se pudieron guardar los cambios: {err}")),
        ),
    };
    if !err.is_recoverable() {
        error!(error = %err, "request failed");
    }
    (status, Html(render::error_page(&notice))).into_response()
}

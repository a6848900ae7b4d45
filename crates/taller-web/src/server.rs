//! HTTP server for the ticket editor

use std::sync::{Arc, Mutex};

use axum::{middleware, Router};
use taller::{SheetStore, TicketEditor};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::WebError;
use crate::gate::AccessGate;
use crate::routes;

/// Store type the server works with, whatever backend was opened
pub type BoxedStore = Box<dyn SheetStore + Send>;

/// Application state shared across handlers
pub struct AppState {
    /// One request at a time touches the store
    pub editor: Arc<Mutex<TicketEditor<BoxedStore>>>,
    pub gate: AccessGate,
    /// Seconds the save confirmation stays up before the ticket reloads
    pub confirm_seconds: u64,
}

impl AppState {
    pub fn new<S>(editor: TicketEditor<S>, gate: AccessGate) -> Self
    where
        S: SheetStore + Send + 'static,
    {
        let layout = editor.layout().clone();
        let store: BoxedStore = Box::new(editor.into_store());
        Self {
            editor: Arc::new(Mutex::new(TicketEditor::new(store, layout))),
            gate,
            confirm_seconds: 2,
        }
    }

    pub fn with_confirm_seconds(mut self, seconds: u64) -> Self {
        self.confirm_seconds = seconds;
        self
    }
}

/// Build the router; every ticket page sits behind the access gate
pub fn router(state: Arc<AppState>) -> Router {
    let tickets = routes::ticket_routes().route_layer(middleware::from_fn_with_state(
        Arc::clone(&state),
        routes::require_access,
    ));

    Router::new()
        .merge(tickets)
        .merge(routes::gate_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until it fails
pub async fn run(state: AppState, bind: &str) -> Result<(), WebError> {
    let gated = state.gate.is_enabled();
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|source| WebError::Bind {
            addr: bind.to_string(),
            source,
        })?;
    info!(addr = %bind, gated, "listening on http://{}", bind);

    axum::serve(listener, app).await?;
    Ok(())
}

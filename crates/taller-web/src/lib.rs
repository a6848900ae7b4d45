//! # taller-web
//!
//! HTTP front end for the ticket editor: a search box, the edit form of one
//! ticket and the save confirmation, optionally behind a shared passphrase.

pub mod error;
pub mod gate;
pub mod render;
pub mod routes;
pub mod server;

pub use error::WebError;
pub use gate::AccessGate;
pub use server::{router, run, AppState};

//! Error types for the HTTP server

use thiserror::Error;

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum WebError {
    /// The listen address could not be bound
    #[error("Cannot listen on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop failed
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

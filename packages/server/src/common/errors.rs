use thiserror::Error;

pub type Result<T, E = BlogError> = std::result::Result<T, E>;

/// Errors surfaced by the blog's domain operations
#[derive(Error, Debug)]
pub enum BlogError {
    /// Any failure talking to the backing store.
    #[error("Store error while {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// The writer could not produce a storable record.
    #[error("Write error: {0}")]
    Write(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl BlogError {
    pub fn store(operation: &'static str, source: anyhow::Error) -> Self {
        Self::Store { operation, source }
    }
}

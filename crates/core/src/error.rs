use crate::types::DbId;

/// Domain-level errors shared by the store, API, and any future tooling.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested record does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain rule (required field empty, unknown enum value, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request conflicts with current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unexpected failure that should not be shown verbatim to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Errors produced by domain logic and surfaced by the API layer.
///
/// The API layer maps these to HTTP statuses: `NotFound` -> 404,
/// `Validation` and `InvalidState` -> 400, `Conflict` -> 409,
/// `Unauthorized` -> 401, `Forbidden` -> 403, `Internal` -> 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup failed.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation; no state was mutated.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is not allowed in the entity's current state
    /// (e.g. transitioning a terminal submission).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A uniqueness or concurrency conflict.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks the required capability.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure. Details go to logs, not clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

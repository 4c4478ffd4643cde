//! Domain error taxonomy shared across the workspace.
//!
//! Every fallible core operation returns [`CoreError`]. The API crate maps
//! each variant onto an HTTP status in its `AppError` wrapper.

/// Domain-level error.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist in the expected relation.
    ///
    /// `id` is pre-rendered so both UUID-keyed and sequence-keyed entities
    /// fit the same variant.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Malformed or out-of-policy input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The acting user is not authorized for the target resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invariant breakage or misconfiguration. Never caused by user input.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] for any displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

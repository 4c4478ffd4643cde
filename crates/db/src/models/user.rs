//! User models and DTOs.

use labelkit_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `users` table.
///
/// The password is an opaque credential compared verbatim at login;
/// hashing is out of scope for this deployment. It is skipped during
/// serialization so it can never leak through a response body.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Historical labeling-speed figure; stored but unused by core logic.
    pub annotation_rate: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
}

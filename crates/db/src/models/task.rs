//! Task models and DTOs.

use labelkit_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    /// Absolute path of the directory the task's images were scanned from.
    pub root_folder: String,
    /// NULL after the creating user is deleted.
    pub creator_id: Option<Uuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a new task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub root_folder: String,
    pub creator_id: Uuid,
}

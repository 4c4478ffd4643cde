//! Label keybind models.

use labelkit_core::reconcile::TaskKeybind;
use labelkit_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `label_keybinds` table: one user's binding of a single
/// character to a label, scoped to one task.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LabelKeybind {
    pub id: Uuid,
    pub label: String,
    pub keybind: String,
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LabelKeybind {
    /// Reduce to the value object the reconciliation engine consumes.
    pub fn to_task_keybind(&self) -> TaskKeybind {
        TaskKeybind {
            id: self.id,
            user_id: self.user_id,
            label: self.label.clone(),
            keybind: self.keybind.clone(),
        }
    }
}

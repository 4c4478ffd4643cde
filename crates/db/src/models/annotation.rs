//! Annotation models.

use labelkit_core::reconcile::TaskAnnotation;
use labelkit_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `annotations` table.
///
/// `labeled` is derived state: true iff `label` is non-empty. The repository
/// keeps the pair consistent in `set_label`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Annotation {
    pub id: DbId,
    pub filepath: String,
    pub label: Option<String>,
    pub labeled: bool,
    pub labeled_by: Option<Uuid>,
    pub task_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Annotation {
    /// Reduce to the value object the reconciliation engine consumes.
    pub fn to_task_annotation(&self) -> TaskAnnotation {
        TaskAnnotation {
            id: self.id,
            filepath: self.filepath.clone(),
            labeled: self.labeled,
        }
    }
}

/// A labeled annotation joined with the labeling user, as read by the
/// export query.
#[derive(Debug, Clone, FromRow)]
pub struct LabeledAnnotationRow {
    pub id: DbId,
    pub filepath: String,
    pub label: Option<String>,
    /// NULL when the labeling user has since been deleted.
    pub labeled_by_username: Option<String>,
    pub task_id: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

//! Annotation serving and labeling operations.

use labelkit_core::error::CoreError;
use labelkit_core::progress::{self, Progress, COMPLETED_SENTINEL};
use labelkit_core::types::DbId;
use labelkit_core::validation;
use labelkit_db::models::annotation::Annotation;
use labelkit_db::repositories::annotation_repo::AnnotationRepo;
use labelkit_db::repositories::task_repo::TaskRepo;
use labelkit_db::DbPool;
use uuid::Uuid;

use crate::error::AppResult;

/// What to serve for a contributor's next labeling step.
#[derive(Debug)]
pub enum NextAnnotation {
    /// The unlabeled annotation with the smallest id.
    Pending(Annotation),
    /// Every annotation is labeled. Callers serve the placeholder image
    /// under [`COMPLETED_SENTINEL`].
    Completed,
}

impl NextAnnotation {
    /// The id to report to the client.
    pub fn id(&self) -> DbId {
        match self {
            NextAnnotation::Pending(a) => a.id,
            NextAnnotation::Completed => COMPLETED_SENTINEL,
        }
    }
}

/// Pick the next annotation for `user_id` to label on a task.
///
/// The caller must be a contributor. Annotation ids are assigned in scan
/// order at creation, so the smallest unlabeled id walks the directory in
/// order.
pub async fn next_annotation(
    pool: &DbPool,
    user_id: Uuid,
    task_id: Uuid,
) -> AppResult<NextAnnotation> {
    require_contributor(pool, user_id, task_id).await?;

    match AnnotationRepo::first_unlabeled(pool, task_id).await? {
        Some(annotation) => Ok(NextAnnotation::Pending(annotation)),
        None => Ok(NextAnnotation::Completed),
    }
}

/// Fetch one annotation, checking it belongs to the given task.
pub async fn get_annotation(
    pool: &DbPool,
    user_id: Uuid,
    task_id: Uuid,
    annotation_id: DbId,
) -> AppResult<Annotation> {
    require_contributor(pool, user_id, task_id).await?;

    let annotation = AnnotationRepo::find_by_id(pool, annotation_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
    if annotation.task_id != task_id {
        return Err(CoreError::Forbidden(
            "Annotation does not belong to task".to_string(),
        )
        .into());
    }
    Ok(annotation)
}

/// Record (or clear) a label and return the task's refreshed progress.
///
/// The completed sentinel and any other non-positive id skip the write and
/// act as a pure progress query, which is how clients poll after the last
/// annotation is labeled. An empty label clears the row back to unlabeled;
/// a non-empty label must pass the same validation as task keybind labels.
pub async fn update_annotation_label(
    pool: &DbPool,
    user_id: Uuid,
    task_id: Uuid,
    annotation_id: DbId,
    label: Option<&str>,
) -> AppResult<Progress> {
    if let Some(label) = label {
        if !label.is_empty() {
            validation::validate_label(label)?;
        }
    }

    require_contributor(pool, user_id, task_id).await?;

    if annotation_id > 0 {
        let annotation = AnnotationRepo::find_by_id(pool, annotation_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
        if annotation.task_id != task_id {
            return Err(CoreError::Forbidden(
                "Annotation does not belong to task".to_string(),
            )
            .into());
        }

        let mut tx = pool.begin().await?;
        AnnotationRepo::set_label(&mut *tx, annotation_id, label, user_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Annotation", annotation_id))?;
        tx.commit().await?;
    }

    let (total, labeled) = AnnotationRepo::counts(pool, task_id).await?;
    Ok(progress::progress(total as u64, labeled as u64))
}

/// Reject callers who are not contributors on the task.
async fn require_contributor(pool: &DbPool, user_id: Uuid, task_id: Uuid) -> AppResult<()> {
    if !TaskRepo::is_contributor(pool, user_id, task_id).await? {
        return Err(CoreError::Forbidden(
            "Task is not assigned to the current user".to_string(),
        )
        .into());
    }
    Ok(())
}

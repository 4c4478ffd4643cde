//! Task lifecycle operations: create, assign, unassign, update, export.

use std::path::Path;

use labelkit_core::error::CoreError;
use labelkit_core::reconcile::{
    self, SubmittedKeybind, TaskAnnotation, TaskKeybind,
};
use labelkit_core::scanner::scan_image_files;
use labelkit_core::validation::LabelKeybindPair;
use labelkit_db::models::annotation::LabeledAnnotationRow;
use labelkit_db::models::task::{CreateTask, Task};
use labelkit_db::repositories::annotation_repo::AnnotationRepo;
use labelkit_db::repositories::label_keybind_repo::LabelKeybindRepo;
use labelkit_db::repositories::task_repo::TaskRepo;
use labelkit_db::DbPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Create a task from an image directory.
///
/// Scans `root_folder`, plans the creator's keybind set and the annotation
/// rows, then persists the task, keybinds, annotations, and the creator's
/// contributor link in one transaction. A scan or validation failure leaves
/// no rows behind.
pub async fn create_task(
    pool: &DbPool,
    creator_id: Uuid,
    title: &str,
    root_folder: &str,
    keybinds: &[LabelKeybindPair],
) -> AppResult<Task> {
    let files = scan_image_files(Path::new(root_folder))?;
    let plan = reconcile::plan_task_creation(title, keybinds, files)?;

    let mut tx = pool.begin().await?;

    let task = TaskRepo::create(
        &mut *tx,
        &CreateTask {
            title: title.to_string(),
            root_folder: root_folder.to_string(),
            creator_id,
        },
    )
    .await?;

    LabelKeybindRepo::create_many(&mut *tx, creator_id, task.id, &plan.keybinds).await?;
    AnnotationRepo::create_many(&mut *tx, task.id, &plan.annotation_filepaths).await?;
    TaskRepo::add_contributor(&mut *tx, creator_id, task.id).await?;

    tx.commit().await?;

    tracing::info!(
        task_id = %task.id,
        annotations = plan.annotation_filepaths.len(),
        "Task created"
    );
    Ok(task)
}

/// Assign a batch of tasks to a user.
///
/// Unknown ids are silently skipped rather than failing the batch. For
/// each found task the user is linked as a contributor; if they have no
/// keybinds on the task yet they receive default bindings covering the
/// task's label set. All writes for the whole batch share one transaction.
pub async fn assign_tasks(
    pool: &DbPool,
    user_id: Uuid,
    task_ids: &[Uuid],
) -> AppResult<Vec<Task>> {
    let mut tx = pool.begin().await?;

    let tasks = TaskRepo::find_many_by_ids(&mut *tx, task_ids).await?;

    for task in &tasks {
        let existing: Vec<TaskKeybind> = LabelKeybindRepo::list_by_task(&mut *tx, task.id)
            .await?
            .iter()
            .map(|k| k.to_task_keybind())
            .collect();

        if let Some(defaults) =
            reconcile::default_keybinds_for_assignment(&existing, user_id)?
        {
            LabelKeybindRepo::create_many(&mut *tx, user_id, task.id, &defaults).await?;
        }
        TaskRepo::add_contributor(&mut *tx, user_id, task.id).await?;
    }

    tx.commit().await?;

    tracing::info!(%user_id, count = tasks.len(), "Tasks assigned");
    Ok(tasks)
}

/// Remove a task from a user's assigned set.
///
/// The user's keybinds and any labels they recorded stay behind, so
/// re-assignment later restores their bindings untouched.
pub async fn unassign_task(pool: &DbPool, user_id: Uuid, task_id: Uuid) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    let removed = TaskRepo::remove_contributor(&mut *tx, user_id, task_id).await?;
    if removed == 0 {
        return Err(CoreError::not_found("Assigned task", task_id).into());
    }
    tx.commit().await?;

    tracing::info!(%user_id, %task_id, "Task unassigned");
    Ok(())
}

/// Update a task's keybinds (for the acting user) and its file list.
///
/// The keybind merge is a per-user replace: the acting user's rows are
/// deleted and the submitted set inserted fresh, so swaps between rows
/// clear the per-user uniqueness constraints. The annotation merge keeps
/// every row whose filepath is still submitted, label intact, and creates
/// fresh unlabeled rows for new filepaths. Both merges commit atomically.
pub async fn update_task(
    pool: &DbPool,
    acting_user: Uuid,
    task_id: Uuid,
    submitted_keybinds: &[SubmittedKeybind],
    submitted_files: &[String],
) -> AppResult<Task> {
    let task = TaskRepo::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;

    let mut tx = pool.begin().await?;

    let existing_keybinds: Vec<TaskKeybind> = LabelKeybindRepo::list_by_task(&mut *tx, task_id)
        .await?
        .iter()
        .map(|k| k.to_task_keybind())
        .collect();
    let keybind_merge =
        reconcile::merge_keybinds(&existing_keybinds, acting_user, submitted_keybinds)?;

    LabelKeybindRepo::delete_by_ids(&mut *tx, &keybind_merge.removed_ids).await?;
    LabelKeybindRepo::create_many(&mut *tx, acting_user, task_id, &keybind_merge.creates)
        .await?;

    let existing_annotations: Vec<TaskAnnotation> = AnnotationRepo::list_by_task(&mut *tx, task_id)
        .await?
        .iter()
        .map(|a| a.to_task_annotation())
        .collect();
    let annotation_merge =
        reconcile::merge_annotations(&existing_annotations, submitted_files)?;

    AnnotationRepo::delete_by_ids(&mut *tx, &annotation_merge.removed_ids).await?;
    AnnotationRepo::create_many(&mut *tx, task_id, &annotation_merge.added_filepaths).await?;

    tx.commit().await?;

    tracing::info!(
        %task_id,
        kept = annotation_merge.kept_ids.len(),
        removed = annotation_merge.removed_ids.len(),
        added = annotation_merge.added_filepaths.len(),
        "Task updated"
    );
    Ok(task)
}

/// Load a task's labeled annotations, joined with labeler usernames, for
/// export.
pub async fn export_rows(
    pool: &DbPool,
    task_id: Uuid,
) -> AppResult<(Task, Vec<LabeledAnnotationRow>)> {
    let task = TaskRepo::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Task", task_id))?;
    let rows = AnnotationRepo::list_labeled_with_usernames(pool, task_id).await?;
    Ok((task, rows))
}

//! Task reconciliation engine.
//!
//! Pure decision logic for task creation, contributor keybind assignment,
//! and task update merges. Functions here take the task's current state as
//! plain values and emit the set of store mutations to perform; the API
//! crate's orchestrator applies them inside one transaction.
//!
//! The invariants protected here:
//! - no duplicate or lost annotation filepaths across a task edit,
//! - labels recorded before an edit survive it,
//! - one user's keybind update never touches another user's rows,
//! - re-assigning a user to a task is a no-op for their keybinds.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::CoreError;
use crate::keybinds::default_keybinds_for_labels;
use crate::types::DbId;
use crate::validation::{self, LabelKeybindPair};

// ---------------------------------------------------------------------------
// Input / output value types
// ---------------------------------------------------------------------------

/// A task's existing keybind row, as loaded from the store.
#[derive(Debug, Clone)]
pub struct TaskKeybind {
    pub id: Uuid,
    pub user_id: Uuid,
    pub label: String,
    pub keybind: String,
}

/// A task's existing annotation row, reduced to the fields reconciliation
/// needs.
#[derive(Debug, Clone)]
pub struct TaskAnnotation {
    pub id: DbId,
    pub filepath: String,
    pub labeled: bool,
}

/// A keybind row to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKeybind {
    pub label: String,
    pub keybind: String,
}

/// A keybind submitted in a task update. Carries the existing row id when
/// the client is editing a row in place.
#[derive(Debug, Clone)]
pub struct SubmittedKeybind {
    pub id: Option<Uuid>,
    pub label: String,
    pub keybind: String,
}

/// Mutations produced by [`plan_task_creation`].
#[derive(Debug)]
pub struct TaskPlan {
    /// Keybind rows to create, bound to the creator.
    pub keybinds: Vec<NewKeybind>,
    /// One unlabeled annotation row per filepath, in creation order.
    pub annotation_filepaths: Vec<String>,
}

/// Mutations produced by [`merge_keybinds`].
#[derive(Debug)]
pub struct KeybindMerge {
    /// The acting user's existing rows, all deleted before the re-insert.
    pub removed_ids: Vec<Uuid>,
    /// The submitted set, created fresh after the delete.
    pub creates: Vec<NewKeybind>,
}

/// Mutations produced by [`merge_annotations`].
#[derive(Debug)]
pub struct AnnotationMerge {
    /// Rows that survive unchanged, labels and ids intact.
    pub kept_ids: Vec<DbId>,
    /// Rows whose filepath left the task's file set.
    pub removed_ids: Vec<DbId>,
    /// Filepaths needing fresh unlabeled rows, in submitted order.
    pub added_filepaths: Vec<String>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Plan the artifacts of a new task: the creator's keybind set and one
/// unlabeled annotation per scanned image file.
///
/// Validates the title, the keybind set (well-formed, pairwise-unique labels
/// and keybinds, no reserved keys), and the file list (no duplicates). The
/// orchestrator persists the task, keybinds, annotations, and the creator's
/// contributor link atomically.
pub fn plan_task_creation(
    title: &str,
    requested_keybinds: &[LabelKeybindPair],
    image_files: Vec<String>,
) -> Result<TaskPlan, CoreError> {
    validation::validate_title(title)?;
    validation::validate_keybind_set(requested_keybinds)?;
    validation::validate_file_list(&image_files)?;

    let keybinds = requested_keybinds
        .iter()
        .map(|pair| NewKeybind {
            label: pair.label.clone(),
            keybind: pair.keybind.clone(),
        })
        .collect();

    Ok(TaskPlan {
        keybinds,
        annotation_filepaths: image_files,
    })
}

/// Compute the default keybinds for a user joining a task.
///
/// Returns `None` when the user already has any keybind on the task, which
/// makes re-assignment idempotent and preserves a returning user's earlier
/// bindings. Otherwise covers the task's distinct label set -- the union
/// across all contributors, lowercased -- so every label ever recorded on
/// the task stays enterable for the new contributor.
pub fn default_keybinds_for_assignment(
    existing: &[TaskKeybind],
    joining_user: Uuid,
) -> Result<Option<Vec<NewKeybind>>, CoreError> {
    if existing.iter().any(|k| k.user_id == joining_user) {
        return Ok(None);
    }

    let mut labels: Vec<String> = existing.iter().map(|k| k.label.to_lowercase()).collect();
    labels.sort();
    labels.dedup();

    let assigned = default_keybinds_for_labels(&labels)?;
    Ok(Some(
        assigned
            .into_iter()
            .map(|(label, key)| NewKeybind {
                label,
                keybind: key.to_string(),
            })
            .collect(),
    ))
}

/// Replace the acting user's keybind set for a task.
///
/// A full per-user replace: every existing row of the acting user is
/// removed and the submitted set is created fresh, in that order. Applying
/// the delete before the insert means a submission that swaps two labels
/// or keybinds between rows never puts the store through a transient
/// duplicate. Submitted row ids are checked for ownership only; rows
/// belonging to other users are never touched.
pub fn merge_keybinds(
    existing: &[TaskKeybind],
    acting_user: Uuid,
    submitted: &[SubmittedKeybind],
) -> Result<KeybindMerge, CoreError> {
    let pairs: Vec<LabelKeybindPair> = submitted
        .iter()
        .map(|k| LabelKeybindPair {
            label: k.label.clone(),
            keybind: k.keybind.clone(),
        })
        .collect();
    validation::validate_keybind_set(&pairs)?;

    let own_ids: HashSet<Uuid> = existing
        .iter()
        .filter(|k| k.user_id == acting_user)
        .map(|k| k.id)
        .collect();

    let mut creates = Vec::with_capacity(submitted.len());
    for entry in submitted {
        if let Some(id) = entry.id {
            if !own_ids.contains(&id) {
                return Err(CoreError::Validation(format!(
                    "Keybind {id} does not belong to the acting user on this task"
                )));
            }
        }
        creates.push(NewKeybind {
            label: entry.label.clone(),
            keybind: entry.keybind.clone(),
        });
    }

    let removed_ids = existing
        .iter()
        .filter(|k| k.user_id == acting_user)
        .map(|k| k.id)
        .collect();

    Ok(KeybindMerge {
        removed_ids,
        creates,
    })
}

/// Reconcile a task's annotation set against a submitted file list.
///
/// Partitions the existing rows into kept (filepath still submitted) and
/// removed (filepath gone); filepaths with no existing row become fresh
/// unlabeled annotations. Kept rows retain their id, label, labeled flag,
/// and labeled_by, so an edit never destroys recorded labels. The resulting
/// filepath set equals the submitted set exactly.
pub fn merge_annotations(
    existing: &[TaskAnnotation],
    submitted_files: &[String],
) -> Result<AnnotationMerge, CoreError> {
    validation::validate_file_list(submitted_files)?;

    let submitted: HashSet<&str> = submitted_files.iter().map(String::as_str).collect();
    let current: HashSet<&str> = existing.iter().map(|a| a.filepath.as_str()).collect();

    let mut kept_ids = Vec::new();
    let mut removed_ids = Vec::new();
    for annotation in existing {
        if submitted.contains(annotation.filepath.as_str()) {
            kept_ids.push(annotation.id);
        } else {
            removed_ids.push(annotation.id);
        }
    }

    let added_filepaths = submitted_files
        .iter()
        .filter(|f| !current.contains(f.as_str()))
        .cloned()
        .collect();

    Ok(AnnotationMerge {
        kept_ids,
        removed_ids,
        added_filepaths,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Labeling progress and "next unlabeled" ordering.

use serde::Serialize;

use crate::reconcile::TaskAnnotation;
use crate::types::DbId;

/// Out-of-band annotation id meaning "every annotation is labeled".
///
/// Sent to clients in place of a real id; clients echo it back on label
/// updates, which the orchestrator treats as a read-only progress query.
pub const COMPLETED_SENTINEL: DbId = -999;

/// Labeling progress for one task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub total: u64,
    pub labeled: u64,
    /// Percent labeled, rounded to two decimals and clamped to 100.
    pub progress: f64,
}

/// Compute labeling progress.
///
/// A task with zero annotations reports 0% rather than failing: an empty
/// directory is a legitimate task state. The clamp guards against float
/// rounding drifting past 100.
pub fn progress(total: u64, labeled: u64) -> Progress {
    let percent = if total == 0 {
        0.0
    } else {
        let raw = (labeled as f64 / total as f64) * 100.0;
        let rounded = (raw * 100.0).round() / 100.0;
        rounded.min(100.0)
    };
    Progress {
        total,
        labeled,
        progress: percent,
    }
}

/// Pick the next annotation to label: the unlabeled row with the smallest
/// id. Ids are assigned sequentially at creation, so this walks the task in
/// directory-scan order and append order after updates. Returns `None` once
/// every annotation is labeled.
pub fn next_unlabeled(annotations: &[TaskAnnotation]) -> Option<&TaskAnnotation> {
    annotations
        .iter()
        .filter(|a| !a.labeled)
        .min_by_key(|a| a.id)
}

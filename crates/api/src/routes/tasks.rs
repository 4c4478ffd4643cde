//! Route definitions for the `/tasks` resource.

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Task routes mounted at `/tasks`. All require authentication.
///
/// ```text
/// POST   /create              -> create_task
/// POST   /assign              -> assign_tasks
/// DELETE /unassign            -> unassign_task
/// PATCH  /update              -> update_task
/// GET    /export_annotations  -> export_annotations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(tasks::create_task))
        .route("/assign", post(tasks::assign_tasks))
        .route("/unassign", delete(tasks::unassign_task))
        .route("/update", patch(tasks::update_task))
        .route("/export_annotations", get(tasks::export_annotations))
}

pub mod annotations;
pub mod health;
pub mod system;
pub mod tasks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/create                         register (public)
/// /users/login                          login (public)
/// /users/check_username                 availability probe (public)
///
/// /tasks/create                         create task from image directory
/// /tasks/assign                         assign tasks to current user
/// /tasks/unassign                       unassign task from current user
/// /tasks/update                         update keybinds + file list
/// /tasks/export_annotations             streamed JSON export
///
/// /annotations/get_next_annotation      next image to label
/// /annotations/get_annotation           one specific image
/// /annotations/update_annotation        record label, return progress
///
/// /system/check_path                    image-directory probe
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/tasks", tasks::router())
        .nest("/annotations", annotations::router())
        .nest("/system", system::router())
}

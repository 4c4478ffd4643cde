//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// POST /create          -> create_user (public)
/// POST /login           -> login (public)
/// GET  /check_username  -> check_username (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(users::create_user))
        .route("/login", post(users::login))
        .route("/check_username", get(users::check_username))
}

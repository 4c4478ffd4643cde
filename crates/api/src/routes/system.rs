//! Route definitions for the `/system` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::system;
use crate::state::AppState;

/// System routes mounted at `/system`.
///
/// ```text
/// GET /check_path -> check_path
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/check_path", get(system::check_path))
}

//! Route definitions for the `/annotations` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::annotations;
use crate::state::AppState;

/// Annotation routes mounted at `/annotations`. All require authentication.
///
/// ```text
/// GET   /get_next_annotation  -> get_next_annotation
/// GET   /get_annotation       -> get_annotation
/// PATCH /update_annotation    -> update_annotation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/get_next_annotation",
            get(annotations::get_next_annotation),
        )
        .route("/get_annotation", get(annotations::get_annotation))
        .route("/update_annotation", patch(annotations::update_annotation))
}

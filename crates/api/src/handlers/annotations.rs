//! Handlers for the `/annotations` resource: serving images to label and
//! recording labels.

use std::path::Path;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use labelkit_core::progress::Progress;
use labelkit_core::types::DbId;
use uuid::Uuid;

use crate::engine::annotations as engine;
use crate::engine::annotations::NextAnnotation;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response header carrying the served annotation's id (or the completed
/// sentinel).
pub const ANNOTATION_ID_HEADER: &str = "x-metadata-annotationid";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /annotations/get_next_annotation`.
#[derive(Debug, Deserialize)]
pub struct NextAnnotationQuery {
    pub task_id: Uuid,
}

/// Query parameters naming one annotation on one task.
#[derive(Debug, Deserialize)]
pub struct AnnotationQuery {
    pub task_id: Uuid,
    pub annotation_id: DbId,
}

/// Request body for `PATCH /annotations/update_annotation`. An absent or
/// empty label clears the annotation back to unlabeled.
#[derive(Debug, Deserialize)]
pub struct UpdateAnnotationRequest {
    pub label: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/annotations/get_next_annotation?task_id=
///
/// Serve the image of the next unlabeled annotation, its id in the
/// `X-Metadata-AnnotationID` header. Once every annotation is labeled,
/// serves the placeholder image under the completed sentinel instead.
pub async fn get_next_annotation(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<NextAnnotationQuery>,
) -> AppResult<Response> {
    let next = engine::next_annotation(&state.pool, user.user_id, query.task_id).await?;

    let filepath = match &next {
        NextAnnotation::Pending(annotation) => annotation.filepath.clone(),
        NextAnnotation::Completed => state.config.completed_image_path.clone(),
    };
    serve_image(&filepath, next.id()).await
}

/// GET /api/annotations/get_annotation?task_id=&annotation_id=
///
/// Serve one specific annotation's image. 403 when the annotation does not
/// belong to the given task.
pub async fn get_annotation(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AnnotationQuery>,
) -> AppResult<Response> {
    let annotation =
        engine::get_annotation(&state.pool, user.user_id, query.task_id, query.annotation_id)
            .await?;
    serve_image(&annotation.filepath, annotation.id).await
}

/// PATCH /api/annotations/update_annotation?task_id=&annotation_id=
///
/// Record (or clear) a label and return the task's refreshed progress. The
/// completed sentinel id acts as a pure progress query.
pub async fn update_annotation(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AnnotationQuery>,
    Json(input): Json<UpdateAnnotationRequest>,
) -> AppResult<Json<Progress>> {
    let progress = engine::update_annotation_label(
        &state.pool,
        user.user_id,
        query.task_id,
        query.annotation_id,
        input.label.as_deref(),
    )
    .await?;
    Ok(Json(progress))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read an image off disk and wrap it in a response with the annotation id
/// header.
async fn serve_image(filepath: &str, annotation_id: DbId) -> AppResult<Response> {
    let bytes = tokio::fs::read(Path::new(filepath))
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read {filepath}: {e}")))?;

    Ok((
        [
            ("content-type", "image/png".to_string()),
            (ANNOTATION_ID_HEADER, annotation_id.to_string()),
        ],
        bytes,
    )
        .into_response())
}

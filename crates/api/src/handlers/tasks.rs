//! Handlers for the `/tasks` resource (create, assign, unassign, update,
//! export).

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::stream;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labelkit_core::reconcile::SubmittedKeybind;
use labelkit_core::types::{DbId, Timestamp};
use labelkit_core::validation::LabelKeybindPair;
use labelkit_db::models::annotation::LabeledAnnotationRow;

use crate::engine::tasks as engine;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /tasks/create`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    /// Absolute path of the image directory to scan.
    pub root: String,
    pub label_keybinds: Vec<KeybindInput>,
}

/// A label/keybind pair as submitted by the client.
#[derive(Debug, Deserialize)]
pub struct KeybindInput {
    pub label: String,
    pub keybind: String,
}

/// Request body for `POST /tasks/assign`.
#[derive(Debug, Deserialize)]
pub struct AssignTasksRequest {
    pub tasks_to_add_ids: Vec<Uuid>,
}

/// Query parameters carrying a task id.
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub task_id: Uuid,
}

/// Request body for `PATCH /tasks/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub label_keybinds: Vec<UpdateKeybindInput>,
    /// The task's full post-edit file list.
    pub files: Vec<String>,
}

/// A keybind row in a task update. `lk_id` is present when the client is
/// editing an existing row.
#[derive(Debug, Deserialize)]
pub struct UpdateKeybindInput {
    pub lk_id: Option<Uuid>,
    pub label: String,
    pub keybind: String,
}

/// One entry in the annotation export stream.
#[derive(Debug, Serialize)]
struct ExportEntry {
    task_title: String,
    task_id: Uuid,
    annotation_id: DbId,
    labeled_by: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    filepath: String,
    label: Option<String>,
}

impl ExportEntry {
    fn from_row(task_title: &str, row: LabeledAnnotationRow) -> Self {
        Self {
            task_title: task_title.to_string(),
            task_id: row.task_id,
            annotation_id: row.id,
            labeled_by: row
                .labeled_by_username
                .unwrap_or_else(|| "Unknown".to_string()),
            created_at: row.created_at,
            updated_at: row.updated_at,
            filepath: row.filepath,
            label: row.label,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/tasks/create
///
/// Create a task from an image directory, with the creator's keybind set.
pub async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let keybinds: Vec<LabelKeybindPair> = input
        .label_keybinds
        .iter()
        .map(|k| LabelKeybindPair {
            label: k.label.clone(),
            keybind: k.keybind.clone(),
        })
        .collect();

    engine::create_task(&state.pool, user.user_id, &input.title, &input.root, &keybinds).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Task successfully created",
        }),
    ))
}

/// POST /api/tasks/assign
///
/// Assign a batch of tasks to the authenticated user.
pub async fn assign_tasks(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<AssignTasksRequest>,
) -> AppResult<Json<MessageResponse>> {
    engine::assign_tasks(&state.pool, user.user_id, &input.tasks_to_add_ids).await?;
    Ok(Json(MessageResponse {
        message: "Task successfully assigned",
    }))
}

/// DELETE /api/tasks/unassign?task_id=
///
/// Remove a task from the authenticated user's assigned set. 404 when the
/// task was never assigned to them.
pub async fn unassign_task(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<MessageResponse>> {
    engine::unassign_task(&state.pool, user.user_id, query.task_id).await?;
    Ok(Json(MessageResponse {
        message: "Task successfully deleted",
    }))
}

/// PATCH /api/tasks/update?task_id=
///
/// Replace the authenticated user's keybinds and reconcile the task's file
/// list. Labels recorded on surviving files are preserved.
pub async fn update_task(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
    Json(input): Json<UpdateTaskRequest>,
) -> AppResult<Json<MessageResponse>> {
    let submitted: Vec<SubmittedKeybind> = input
        .label_keybinds
        .iter()
        .map(|k| SubmittedKeybind {
            id: k.lk_id,
            label: k.label.clone(),
            keybind: k.keybind.clone(),
        })
        .collect();

    engine::update_task(
        &state.pool,
        user.user_id,
        query.task_id,
        &submitted,
        &input.files,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Task successfully updated",
    }))
}

/// GET /api/tasks/export_annotations?task_id=
///
/// Stream the task's labeled annotations as a JSON array download, one
/// serialized entry per chunk.
pub async fn export_annotations(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> AppResult<Response> {
    let (task, rows) = engine::export_rows(&state.pool, query.task_id).await?;

    // Each entry is serialized only when its chunk is polled off the stream.
    let total = rows.len();
    let title = task.title.clone();
    let entries = rows.into_iter().enumerate().map(move |(i, row)| {
        let entry = ExportEntry::from_row(&title, row);
        let rendered = serde_json::to_string_pretty(&entry)
            .unwrap_or_else(|_| "null".to_string());
        let separator = if i + 1 < total { ",\n" } else { "\n" };
        format!("{rendered}{separator}")
    });

    let chunks = std::iter::once("[\n".to_string())
        .chain(entries)
        .chain(std::iter::once("]\n".to_string()));
    let body = Body::from_stream(stream::iter(
        chunks.map(Ok::<_, std::convert::Infallible>),
    ));

    let filename = format!("{}_annotations.json", task.title);
    let response = (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body,
    )
        .into_response();
    Ok(response)
}

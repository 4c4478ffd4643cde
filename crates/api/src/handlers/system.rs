//! Handlers for the `/system` resource.

use std::path::Path;

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use labelkit_core::scanner::scan_image_files;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;

/// Query parameters for the path probe.
#[derive(Debug, Deserialize)]
pub struct CheckPathQuery {
    pub path: String,
}

/// Response for the path probe.
#[derive(Debug, Serialize)]
pub struct CheckPathResponse {
    /// Number of annotatable image files directly under the directory.
    pub file_count: usize,
}

/// GET /api/system/check_path?path=
///
/// Probe a directory before task creation: how many image files a task
/// rooted there would get. A missing or non-directory path is a 404, not a
/// 400, so the frontend can treat it as "nothing there yet" while the user
/// types.
pub async fn check_path(
    _user: AuthUser,
    Query(query): Query<CheckPathQuery>,
) -> AppResult<Json<CheckPathResponse>> {
    let path = Path::new(&query.path);
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "Path {} does not exist",
            query.path
        )));
    }
    if !path.is_dir() {
        return Err(AppError::NotFound(format!(
            "Path {} is not a directory",
            query.path
        )));
    }

    let files = scan_image_files(path)?;
    Ok(Json(CheckPathResponse {
        file_count: files.len(),
    }))
}

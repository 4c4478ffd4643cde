//! Handlers for the `/users` resource (register, login, username probe).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labelkit_core::error::CoreError;
use labelkit_db::models::user::CreateUser;
use labelkit_db::repositories::user_repo::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for register and login. Field names follow the frontend's
/// wire format.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub request_username: String,
    pub request_password: String,
}

/// Query parameters for the username availability probe.
#[derive(Debug, Deserialize)]
pub struct CheckUsernameQuery {
    pub request_username: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
}

/// Response for the username availability probe.
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users/create
///
/// Register a new account and log it in. A taken username surfaces as a
/// 409 through the unique constraint.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    if input.request_username.is_empty() {
        return Err(CoreError::Validation("Username must not be empty".into()).into());
    }
    if input.request_password.is_empty() {
        return Err(CoreError::Validation("Password must not be empty".into()).into());
    }

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.request_username,
            password: input.request_password,
        },
    )
    .await?;

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            user: UserInfo {
                id: user.id,
                username: user.username,
            },
        }),
    ))
}

/// POST /api/users/login
///
/// Authenticate with username + password. An unknown username and a wrong
/// password return the same message so the endpoint does not leak which
/// usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.request_username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    if user.password != input.request_password {
        return Err(CoreError::Unauthorized("Invalid username or password".into()).into());
    }

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        user: UserInfo {
            id: user.id,
            username: user.username,
        },
    }))
}

/// GET /api/users/check_username?request_username=
///
/// Whether a username is still free to register.
pub async fn check_username(
    State(state): State<AppState>,
    Query(query): Query<CheckUsernameQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let existing = UserRepo::find_by_username(&state.pool, &query.request_username).await?;
    Ok(Json(AvailabilityResponse {
        available: existing.is_none(),
    }))
}

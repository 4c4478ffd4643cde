//! HTTP-level integration tests for user registration, login, and the
//! username availability probe.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use sqlx::PgPool;

use labelkit_db::models::user::CreateUser;
use labelkit_db::repositories::user_repo::UserRepo;

/// Create a user directly in the database.
async fn seed_user(pool: &PgPool, username: &str, password: &str) -> labelkit_db::models::user::User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password: password.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registering a fresh username returns 201 with a token and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_returns_token_and_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "request_username": "alice",
        "request_password": "hunter2",
    });
    let response = post_json(app, "/api/users/create", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["username"], "alice");
    assert!(json["user"]["id"].is_string());
}

/// Registering a taken username returns 409 via the unique constraint.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_username_conflicts(pool: PgPool) {
    seed_user(&pool, "alice", "hunter2").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "request_username": "alice",
        "request_password": "other",
    });
    let response = post_json(app, "/api/users/create", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// An empty username is rejected up front.
#[sqlx::test(migrations = "../db/migrations")]
async fn register_empty_username_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "request_username": "",
        "request_password": "hunter2",
    });
    let response = post_json(app, "/api/users/create", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success(pool: PgPool) {
    let user = seed_user(&pool, "bob", "secret").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "request_username": "bob",
        "request_password": "secret",
    });
    let response = post_json(app, "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["id"], user.id.to_string());
}

/// A wrong password and an unknown username return 401 with the same
/// message, so the endpoint does not leak which usernames exist.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_do_not_leak_usernames(pool: PgPool) {
    seed_user(&pool, "bob", "secret").await;
    let app = common::build_test_app(pool);

    let wrong_password = serde_json::json!({
        "request_username": "bob",
        "request_password": "not-secret",
    });
    let response = post_json(app.clone(), "/api/users/login", wrong_password).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = body_json(response).await;

    let unknown_user = serde_json::json!({
        "request_username": "ghost",
        "request_password": "whatever",
    });
    let response = post_json(app, "/api/users/login", unknown_user).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body = body_json(response).await;

    assert_eq!(wrong_password_body["error"], "Invalid username or password");
    assert_eq!(wrong_password_body["error"], unknown_user_body["error"]);
}

// ---------------------------------------------------------------------------
// Username probe
// ---------------------------------------------------------------------------

/// The probe reports a free username as available and a taken one as not.
#[sqlx::test(migrations = "../db/migrations")]
async fn check_username_reports_availability(pool: PgPool) {
    seed_user(&pool, "taken", "pw").await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/users/check_username?request_username=fresh").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["available"], true);

    let response = get(app, "/api/users/check_username?request_username=taken").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["available"], false);
}

// ---------------------------------------------------------------------------
// Auth enforcement
// ---------------------------------------------------------------------------

/// Protected routes reject requests without a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn protected_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(
        app,
        "/api/annotations/get_next_annotation?task_id=00000000-0000-0000-0000-000000000000",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Protected routes reject garbage tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn protected_route_rejects_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        "/api/annotations/get_next_annotation?task_id=00000000-0000-0000-0000-000000000000",
        "not-a-jwt",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

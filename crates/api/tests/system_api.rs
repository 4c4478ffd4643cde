//! HTTP-level integration tests for the system path probe.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, get_auth};
use sqlx::PgPool;

use labelkit_db::models::user::CreateUser;
use labelkit_db::repositories::user_repo::UserRepo;

async fn seed_user(pool: &PgPool) -> labelkit_db::models::user::User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: "probe".to_string(),
            password: "pw".to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// The probe counts image files directly under the directory, ignoring
/// other file types.
#[sqlx::test(migrations = "../db/migrations")]
async fn check_path_counts_image_files(pool: PgPool) {
    let user = seed_user(&pool).await;
    let app = common::build_test_app(pool);

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.png"), b"x").unwrap();
    std::fs::write(dir.path().join("b.jpeg"), b"x").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let response = get_auth(
        app,
        &format!("/api/system/check_path?path={}", dir.path().display()),
        &auth_token(user.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["file_count"], 2);
}

/// A missing path is a 404, not a 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn check_path_missing_is_404(pool: PgPool) {
    let user = seed_user(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        "/api/system/check_path?path=/no/such/directory",
        &auth_token(user.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A path naming a file rather than a directory is also a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn check_path_file_is_404(pool: PgPool) {
    let user = seed_user(&pool).await;
    let app = common::build_test_app(pool);

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.png");
    std::fs::write(&file, b"x").unwrap();

    let response = get_auth(
        app,
        &format!("/api/system/check_path?path={}", file.display()),
        &auth_token(user.id),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

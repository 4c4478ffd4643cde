//! Repository for the `tasks` table and the `user_tasks` contributor
//! relation.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::task::{CreateTask, Task};

/// Column list for tasks queries.
const COLUMNS: &str = "id, title, root_folder, creator_id, created_at, updated_at";

/// Provides CRUD operations for tasks and contributor links.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, root_folder, creator_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.root_folder)
            .bind(input.creator_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a task by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load the tasks matching `ids`, ordered by creation date.
    ///
    /// Unknown ids are silently absent from the result.
    pub async fn find_many_by_ids(
        conn: &mut PgConnection,
        ids: &[Uuid],
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE id = ANY($1) ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(ids)
            .fetch_all(&mut *conn)
            .await
    }

    /// Link a user to a task as a contributor. Idempotent.
    pub async fn add_contributor(
        conn: &mut PgConnection,
        user_id: Uuid,
        task_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_tasks (user_id, task_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(task_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Remove a user's contributor link for a task.
    ///
    /// Returns the number of rows removed: 0 means the task was not in the
    /// user's assigned set.
    pub async fn remove_contributor(
        conn: &mut PgConnection,
        user_id: Uuid,
        task_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_tasks WHERE user_id = $1 AND task_id = $2")
            .bind(user_id)
            .bind(task_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Whether a task is in the user's assigned set.
    pub async fn is_contributor(
        pool: &PgPool,
        user_id: Uuid,
        task_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM user_tasks WHERE user_id = $1 AND task_id = $2)",
        )
        .bind(user_id)
        .bind(task_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}

//! Repository for the `label_keybinds` table.

use labelkit_core::reconcile::NewKeybind;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::models::label_keybind::LabelKeybind;

/// Column list for label_keybinds queries.
const COLUMNS: &str = "id, label, keybind, user_id, task_id, created_at, updated_at";

/// Provides data access for label keybinds.
pub struct LabelKeybindRepo;

impl LabelKeybindRepo {
    /// Bulk-insert keybinds for one user on one task.
    pub async fn create_many(
        conn: &mut PgConnection,
        user_id: Uuid,
        task_id: Uuid,
        keybinds: &[NewKeybind],
    ) -> Result<Vec<LabelKeybind>, sqlx::Error> {
        if keybinds.is_empty() {
            return Ok(vec![]);
        }

        let labels: Vec<String> = keybinds.iter().map(|k| k.label.clone()).collect();
        let keys: Vec<String> = keybinds.iter().map(|k| k.keybind.clone()).collect();

        let query = format!(
            "INSERT INTO label_keybinds (label, keybind, user_id, task_id)
             SELECT label, keybind, $3, $4
             FROM UNNEST($1::text[], $2::text[]) AS t(label, keybind)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LabelKeybind>(&query)
            .bind(&labels)
            .bind(&keys)
            .bind(user_id)
            .bind(task_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// List every keybind on a task, across all contributors.
    ///
    /// Takes the transaction connection: callers always read this inside the
    /// same transaction that rewrites the rows.
    pub async fn list_by_task(
        conn: &mut PgConnection,
        task_id: Uuid,
    ) -> Result<Vec<LabelKeybind>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM label_keybinds WHERE task_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, LabelKeybind>(&query)
            .bind(task_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Delete keybinds by id.
    pub async fn delete_by_ids(conn: &mut PgConnection, ids: &[Uuid]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM label_keybinds WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}

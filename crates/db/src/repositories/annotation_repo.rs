//! Repository for the `annotations` table.

use labelkit_core::types::DbId;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::annotation::{Annotation, LabeledAnnotationRow};

/// Column list for annotations queries.
const COLUMNS: &str =
    "id, filepath, label, labeled, labeled_by, task_id, created_at, updated_at";

/// Provides data access for annotations.
pub struct AnnotationRepo;

impl AnnotationRepo {
    /// Bulk-insert unlabeled annotations for a task, one per filepath.
    ///
    /// Filepaths are inserted in slice order so the BIGSERIAL ids follow the
    /// scan order, which is what "next unlabeled" walks.
    pub async fn create_many(
        conn: &mut PgConnection,
        task_id: Uuid,
        filepaths: &[String],
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        if filepaths.is_empty() {
            return Ok(vec![]);
        }

        let query = format!(
            "INSERT INTO annotations (filepath, task_id)
             SELECT f, $2 FROM UNNEST($1::text[]) AS f
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(filepaths)
            .bind(task_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Find an annotation by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM annotations WHERE id = $1");
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a task's annotations in ascending id order.
    ///
    /// Takes the transaction connection: the update merge reads these inside
    /// the same transaction that reconciles them.
    pub async fn list_by_task(
        conn: &mut PgConnection,
        task_id: Uuid,
    ) -> Result<Vec<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations WHERE task_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(task_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// The first unlabeled annotation of a task by ascending id, if any.
    pub async fn first_unlabeled(
        pool: &PgPool,
        task_id: Uuid,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM annotations
             WHERE task_id = $1 AND labeled = FALSE
             ORDER BY id ASC
             LIMIT 1"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(task_id)
            .fetch_optional(pool)
            .await
    }

    /// Total and labeled annotation counts for a task.
    pub async fn counts(pool: &PgPool, task_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
        let row: (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE labeled)
             FROM annotations WHERE task_id = $1",
        )
        .bind(task_id)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Set or clear an annotation's label.
    ///
    /// `labeled` is kept consistent with the label: a `None`/empty label
    /// returns the row to the unlabeled state (the undo path).
    pub async fn set_label(
        conn: &mut PgConnection,
        id: DbId,
        label: Option<&str>,
        labeled_by: Uuid,
    ) -> Result<Option<Annotation>, sqlx::Error> {
        let labeled = label.is_some_and(|l| !l.is_empty());
        let stored_label = label.filter(|l| !l.is_empty());
        let query = format!(
            "UPDATE annotations
             SET label = $2, labeled = $3, labeled_by = $4, updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Annotation>(&query)
            .bind(id)
            .bind(stored_label)
            .bind(labeled)
            .bind(labeled_by)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete annotations by id.
    pub async fn delete_by_ids(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM annotations WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Labeled annotations for a task joined with the labeling user's
    /// username, in ascending id order. Feeds the export stream.
    pub async fn list_labeled_with_usernames(
        pool: &PgPool,
        task_id: Uuid,
    ) -> Result<Vec<LabeledAnnotationRow>, sqlx::Error> {
        sqlx::query_as::<_, LabeledAnnotationRow>(
            "SELECT a.id, a.filepath, a.label, u.username AS labeled_by_username,
                    a.task_id, a.created_at, a.updated_at
             FROM annotations a
             LEFT JOIN users u ON u.id = a.labeled_by
             WHERE a.task_id = $1 AND a.labeled = TRUE
             ORDER BY a.id ASC",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}

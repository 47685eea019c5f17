//! Repository for the `comments` table.
//!
//! Every lookup is scoped to the parent work item, so a comment id from
//! another work item is treated as not found.

use forum_core::status::STATUS_DELETED;
use forum_core::types::DbId;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{stale_row, UPDATE_ATTEMPTS};
use crate::mapping::work_item::apply_comment_update;
use crate::models::comment::{Comment, NewComment, UpdateComment};
use crate::{RepoError, SQL_NOW};

const COLUMNS: &str = "id, work_item_id, user_id, comment, status, created_at, updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (work_item_id, user_id, comment, status)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.work_item_id)
            .bind(input.user_id)
            .bind(&input.comment)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        work_item_id: DbId,
        id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM comments WHERE id = ?1 AND work_item_id = ?2");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(work_item_id)
            .fetch_optional(pool)
            .await
    }

    /// The full comment collection of a work item, oldest first.
    pub async fn list_by_work_item(
        pool: &SqlitePool,
        work_item_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE work_item_id = ?1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(work_item_id)
            .fetch_all(pool)
            .await
    }

    /// Comment collections of several work items in one query.
    pub async fn list_by_work_items(
        pool: &SqlitePool,
        work_item_ids: &[DbId],
    ) -> Result<Vec<Comment>, sqlx::Error> {
        if work_item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM comments WHERE work_item_id IN ("));
        let mut separated = builder.separated(", ");
        for id in work_item_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY created_at, id");
        builder.build_query_as::<Comment>().fetch_all(pool).await
    }

    /// Update a comment. Returns `None` if it does not exist under
    /// `work_item_id`.
    pub async fn update(
        pool: &SqlitePool,
        work_item_id: DbId,
        id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, RepoError> {
        let query = format!(
            "UPDATE comments SET comment = ?3, status = ?4, updated_at = {SQL_NOW}
             WHERE id = ?1 AND work_item_id = ?2 AND comment = ?5 AND status = ?6
             RETURNING {COLUMNS}"
        );
        for _ in 0..UPDATE_ATTEMPTS {
            let Some(current) = Self::find_by_id(pool, work_item_id, id).await? else {
                return Ok(None);
            };
            let mut comment = current.clone();
            apply_comment_update(&mut comment, input)?;

            let updated = sqlx::query_as::<_, Comment>(&query)
                .bind(id)
                .bind(work_item_id)
                .bind(&comment.comment)
                .bind(&comment.status)
                .bind(&current.comment)
                .bind(&current.status)
                .fetch_optional(pool)
                .await?;
            if updated.is_some() {
                return Ok(updated);
            }
        }
        Err(stale_row("Comment", id))
    }

    /// Soft-delete a comment. Returns `true` if a row was marked.
    pub async fn soft_delete(
        pool: &SqlitePool,
        work_item_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET status = ?3, updated_at = {SQL_NOW}
             WHERE id = ?1 AND work_item_id = ?2"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(work_item_id)
            .bind(STATUS_DELETED)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

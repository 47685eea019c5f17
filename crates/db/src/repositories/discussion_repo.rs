//! Repository for the `discussions` table.

use forum_core::status::STATUS_DELETED;
use forum_core::types::DbId;
use sqlx::SqlitePool;

use super::{stale_row, UPDATE_ATTEMPTS};
use crate::mapping::discussion::apply_update;
use crate::models::discussion::{Discussion, DiscussionFilter, NewDiscussion, UpdateDiscussion};
use crate::{RepoError, SQL_NOW};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subject, comment, user_id, status, end_date, created_at, updated_at";

/// Provides CRUD operations for discussions.
pub struct DiscussionRepo;

impl DiscussionRepo {
    /// Insert a new discussion, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &NewDiscussion,
    ) -> Result<Discussion, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussions (subject, comment, user_id, status, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(&input.subject)
            .bind(&input.comment)
            .bind(input.user_id)
            .bind(&input.status)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a discussion by ID, whatever its status.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Discussion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM discussions WHERE id = ?1");
        sqlx::query_as::<_, Discussion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List discussions, most recently created first.
    ///
    /// Soft-deleted rows are skipped unless `filter.include_deleted` is set.
    pub async fn list(
        pool: &SqlitePool,
        filter: &DiscussionFilter,
    ) -> Result<Vec<Discussion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discussions
             WHERE (?1 IS NULL OR status = ?1)
               AND (?2 OR status <> ?3)
             ORDER BY created_at DESC, id DESC
             LIMIT ?4 OFFSET ?5"
        );
        sqlx::query_as::<_, Discussion>(&query)
            .bind(&filter.status)
            .bind(filter.include_deleted)
            .bind(STATUS_DELETED)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a discussion. Only non-`None` fields in `input` are applied.
    ///
    /// The patch is checked and applied against the row as read, and the
    /// write only lands while that row is still current. A row changed in
    /// between is read again and the patch re-applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateDiscussion,
    ) -> Result<Option<Discussion>, RepoError> {
        let query = format!(
            "UPDATE discussions SET
                subject = ?2,
                comment = ?3,
                status = ?4,
                end_date = ?5,
                updated_at = {SQL_NOW}
             WHERE id = ?1
               AND subject = ?6
               AND comment = ?7
               AND status = ?8
               AND julianday(end_date) IS julianday(?9)
             RETURNING {COLUMNS}"
        );
        for _ in 0..UPDATE_ATTEMPTS {
            let Some(current) = Self::find_by_id(pool, id).await? else {
                return Ok(None);
            };
            let mut discussion = current.clone();
            apply_update(&mut discussion, input)?;

            let updated = sqlx::query_as::<_, Discussion>(&query)
                .bind(id)
                .bind(&discussion.subject)
                .bind(&discussion.comment)
                .bind(&discussion.status)
                .bind(discussion.end_date)
                .bind(&current.subject)
                .bind(&current.comment)
                .bind(&current.status)
                .bind(current.end_date)
                .fetch_optional(pool)
                .await?;
            if updated.is_some() {
                return Ok(updated);
            }
        }
        Err(stale_row("Discussion", id))
    }

    /// Soft-delete a discussion by moving its status to `Deleted`.
    /// Returns `true` if a row was marked.
    pub async fn soft_delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE discussions SET status = ?2, updated_at = {SQL_NOW} WHERE id = ?1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(STATUS_DELETED)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a discussion. Responses, participants and
    /// attachments go with it. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM discussions WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

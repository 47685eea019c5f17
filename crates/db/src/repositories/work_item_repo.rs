//! Repository for the `work_items` table.

use forum_core::status::STATUS_DELETED;
use forum_core::types::DbId;
use sqlx::SqlitePool;

use super::{stale_row, UPDATE_ATTEMPTS};
use crate::mapping::work_item::apply_update;
use crate::models::work_item::{NewWorkItem, UpdateWorkItem, WorkItem, WorkItemFilter};
use crate::{RepoError, SQL_NOW};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, subject, comment, user_id, status, end_date, created_at, updated_at";

/// Provides CRUD operations for work items.
pub struct WorkItemRepo;

impl WorkItemRepo {
    /// Insert a new work item, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        input: &NewWorkItem,
    ) -> Result<WorkItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO work_items (subject, comment, user_id, status, end_date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(&input.subject)
            .bind(&input.comment)
            .bind(input.user_id)
            .bind(&input.status)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find a work item by ID, whatever its status.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<WorkItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM work_items WHERE id = ?1");
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List work_items, most recently created first.
    ///
    /// Soft-deleted rows are skipped unless `filter.include_deleted` is set.
    pub async fn list(
        pool: &SqlitePool,
        filter: &WorkItemFilter,
    ) -> Result<Vec<WorkItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM work_items
             WHERE (?1 IS NULL OR status = ?1)
               AND (?2 OR status <> ?3)
             ORDER BY created_at DESC, id DESC
             LIMIT ?4 OFFSET ?5"
        );
        sqlx::query_as::<_, WorkItem>(&query)
            .bind(&filter.status)
            .bind(filter.include_deleted)
            .bind(STATUS_DELETED)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Update a work item. Only non-`None` fields in `input` are applied,
    /// against the row as it is when the write lands.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateWorkItem,
    ) -> Result<Option<WorkItem>, RepoError> {
        let query = format!(
            "UPDATE work_items SET
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
            let mut work_item = current.clone();
            apply_update(&mut work_item, input)?;

            let updated = sqlx::query_as::<_, WorkItem>(&query)
                .bind(id)
                .bind(&work_item.subject)
                .bind(&work_item.comment)
                .bind(&work_item.status)
                .bind(work_item.end_date)
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
        Err(stale_row("WorkItem", id))
    }

    /// Soft-delete a work item by moving its status to `Deleted`.
    /// Returns `true` if a row was marked.
    pub async fn soft_delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE work_items SET status = ?2, updated_at = {SQL_NOW} WHERE id = ?1"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(STATUS_DELETED)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a work item. Comments, participants and
    /// documents go with it. Fails with a foreign-key violation while a
    /// relation still references the work item. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM work_items WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

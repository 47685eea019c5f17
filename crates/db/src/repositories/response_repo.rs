//! Repository for the `responses` table.
//!
//! Every lookup is scoped to the parent discussion, so a response id from
//! another discussion is treated as not found.

use forum_core::status::STATUS_DELETED;
use forum_core::types::DbId;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{stale_row, UPDATE_ATTEMPTS};
use crate::mapping::discussion::apply_response_update;
use crate::models::response::{NewResponse, Response, UpdateResponse};
use crate::{RepoError, SQL_NOW};

const COLUMNS: &str = "id, discussion_id, user_id, comment, status, created_at, updated_at";

/// Provides CRUD operations for responses.
pub struct ResponseRepo;

impl ResponseRepo {
    /// Insert a new response, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &NewResponse) -> Result<Response, sqlx::Error> {
        let query = format!(
            "INSERT INTO responses (discussion_id, user_id, comment, status)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Response>(&query)
            .bind(input.discussion_id)
            .bind(input.user_id)
            .bind(&input.comment)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        discussion_id: DbId,
        id: DbId,
    ) -> Result<Option<Response>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM responses WHERE id = ?1 AND discussion_id = ?2");
        sqlx::query_as::<_, Response>(&query)
            .bind(id)
            .bind(discussion_id)
            .fetch_optional(pool)
            .await
    }

    /// The full response collection of a discussion, oldest first.
    pub async fn list_by_discussion(
        pool: &SqlitePool,
        discussion_id: DbId,
    ) -> Result<Vec<Response>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM responses WHERE discussion_id = ?1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Response>(&query)
            .bind(discussion_id)
            .fetch_all(pool)
            .await
    }

    /// Response collections of several discussions in one query.
    pub async fn list_by_discussions(
        pool: &SqlitePool,
        discussion_ids: &[DbId],
    ) -> Result<Vec<Response>, sqlx::Error> {
        if discussion_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM responses WHERE discussion_id IN ("));
        let mut separated = builder.separated(", ");
        for id in discussion_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY created_at, id");
        builder.build_query_as::<Response>().fetch_all(pool).await
    }

    /// Update a response. Returns `None` if it does not exist under
    /// `discussion_id`.
    pub async fn update(
        pool: &SqlitePool,
        discussion_id: DbId,
        id: DbId,
        input: &UpdateResponse,
    ) -> Result<Option<Response>, RepoError> {
        let query = format!(
            "UPDATE responses SET comment = ?3, status = ?4, updated_at = {SQL_NOW}
             WHERE id = ?1 AND discussion_id = ?2 AND comment = ?5 AND status = ?6
             RETURNING {COLUMNS}"
        );
        for _ in 0..UPDATE_ATTEMPTS {
            let Some(current) = Self::find_by_id(pool, discussion_id, id).await? else {
                return Ok(None);
            };
            let mut response = current.clone();
            apply_response_update(&mut response, input)?;

            let updated = sqlx::query_as::<_, Response>(&query)
                .bind(id)
                .bind(discussion_id)
                .bind(&response.comment)
                .bind(&response.status)
                .bind(&current.comment)
                .bind(&current.status)
                .fetch_optional(pool)
                .await?;
            if updated.is_some() {
                return Ok(updated);
            }
        }
        Err(stale_row("Response", id))
    }

    /// Soft-delete a response. Returns `true` if a row was marked.
    pub async fn soft_delete(
        pool: &SqlitePool,
        discussion_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE responses SET status = ?3, updated_at = {SQL_NOW}
             WHERE id = ?1 AND discussion_id = ?2"
        );
        let result = sqlx::query(&query)
            .bind(id)
            .bind(discussion_id)
            .bind(STATUS_DELETED)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

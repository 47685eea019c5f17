//! Repository for the `users` table.

use forum_core::types::DbId;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::mapping::common::apply_user_update;
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::SQL_NOW;

const COLUMNS: &str = "id, display_name, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!("INSERT INTO users (display_name) VALUES (?1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(input.display_name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load every user whose id is in `ids`. Unknown ids are skipped.
    pub async fn find_by_ids(pool: &SqlitePool, ids: &[DbId]) -> Result<Vec<User>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM users WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");
        builder.build_query_as::<User>().fetch_all(pool).await
    }

    /// List all users ordered by display name.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY display_name, id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let Some(mut user) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        apply_user_update(&mut user, input);

        let query = format!(
            "UPDATE users SET display_name = ?2, updated_at = {SQL_NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&user.display_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user. Fails with a foreign-key violation while any
    /// discussion, response, work item or comment is attributed to them.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

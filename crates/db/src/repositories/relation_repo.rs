//! Repository for the `relations` table.

use forum_core::types::DbId;
use sqlx::SqlitePool;

use crate::mapping::work_item::apply_relation_update;
use crate::models::relation::{NewRelation, Relation, UpdateRelation};
use crate::SQL_NOW;

const COLUMNS: &str =
    "id, from_work_item_id, to_work_item_id, relation_type, created_at, updated_at";

/// Provides CRUD operations for relations between work items.
pub struct RelationRepo;

impl RelationRepo {
    pub async fn create(pool: &SqlitePool, input: &NewRelation) -> Result<Relation, sqlx::Error> {
        let query = format!(
            "INSERT INTO relations (from_work_item_id, to_work_item_id, relation_type)
             VALUES (?1, ?2, ?3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Relation>(&query)
            .bind(input.from_work_item_id)
            .bind(input.to_work_item_id)
            .bind(input.relation_type)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Relation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM relations WHERE id = ?1");
        sqlx::query_as::<_, Relation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Edges touching a work item in either direction, oldest first.
    pub async fn list_for_work_item(
        pool: &SqlitePool,
        work_item_id: DbId,
    ) -> Result<Vec<Relation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM relations
             WHERE from_work_item_id = ?1 OR to_work_item_id = ?1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Relation>(&query)
            .bind(work_item_id)
            .fetch_all(pool)
            .await
    }

    /// Change the kind of an edge. Returns `None` if no row with the given
    /// `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateRelation,
    ) -> Result<Option<Relation>, sqlx::Error> {
        let Some(mut relation) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        apply_relation_update(&mut relation, input);

        let query = format!(
            "UPDATE relations SET relation_type = ?2, updated_at = {SQL_NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Relation>(&query)
            .bind(id)
            .bind(relation.relation_type)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM relations WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `organization_types` table.

use forum_core::types::DbId;
use sqlx::SqlitePool;

use crate::mapping::common::apply_organization_type_update;
use crate::models::organization_type::{
    CreateOrganizationType, OrganizationType, UpdateOrganizationType,
};
use crate::SQL_NOW;

const COLUMNS: &str = "id, type_label, created_at, updated_at";

/// Provides CRUD operations for organization types.
pub struct OrganizationTypeRepo;

impl OrganizationTypeRepo {
    /// Insert a new type. Labels are unique (`uq_organization_types_type_label`).
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateOrganizationType,
    ) -> Result<OrganizationType, sqlx::Error> {
        let query =
            format!("INSERT INTO organization_types (type_label) VALUES (?1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, OrganizationType>(&query)
            .bind(input.type_label.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<OrganizationType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organization_types WHERE id = ?1");
        sqlx::query_as::<_, OrganizationType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &SqlitePool) -> Result<Vec<OrganizationType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organization_types ORDER BY type_label");
        sqlx::query_as::<_, OrganizationType>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a type. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateOrganizationType,
    ) -> Result<Option<OrganizationType>, sqlx::Error> {
        let Some(mut organization_type) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        apply_organization_type_update(&mut organization_type, input);

        let query = format!(
            "UPDATE organization_types SET type_label = ?2, updated_at = {SQL_NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrganizationType>(&query)
            .bind(id)
            .bind(&organization_type.type_label)
            .fetch_optional(pool)
            .await
    }

    /// Delete a type. Restricted: fails with a foreign-key violation while
    /// any participant references it.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM organization_types WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

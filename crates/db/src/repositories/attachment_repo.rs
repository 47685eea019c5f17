//! Repository for the `attachments` (discussion) and `documents`
//! (work item) tables.

use forum_core::types::DbId;
use sqlx::SqlitePool;

use super::{stale_row, UPDATE_ATTEMPTS};
use crate::mapping::common::apply_attachment_update;
use crate::models::attachment::{Attachment, NewAttachment, UpdateAttachment};
use crate::models::entity_ref::ParentKind;
use crate::RepoError;

fn table_for(kind: ParentKind) -> (&'static str, &'static str) {
    match kind {
        ParentKind::Discussion => ("attachments", "discussion_id"),
        ParentKind::WorkItem => ("documents", "work_item_id"),
    }
}

fn columns(parent_column: &str) -> String {
    format!("id, {parent_column} AS parent_id, entity_id, entity_type, url, created_at")
}

/// Provides CRUD operations for attachments and documents.
pub struct AttachmentRepo;

impl AttachmentRepo {
    pub async fn create(
        pool: &SqlitePool,
        kind: ParentKind,
        input: &NewAttachment,
    ) -> Result<Attachment, sqlx::Error> {
        let (table, parent) = table_for(kind);
        let query = format!(
            "INSERT INTO {table} ({parent}, entity_id, entity_type, url)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {}",
            columns(parent)
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(input.parent_id)
            .bind(input.entity_id)
            .bind(input.entity_type)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        kind: ParentKind,
        parent_id: DbId,
        id: DbId,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let (table, parent) = table_for(kind);
        let query = format!(
            "SELECT {} FROM {table} WHERE id = ?1 AND {parent} = ?2",
            columns(parent)
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .bind(parent_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_parent(
        pool: &SqlitePool,
        kind: ParentKind,
        parent_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let (table, parent) = table_for(kind);
        let query = format!(
            "SELECT {} FROM {table} WHERE {parent} = ?1 ORDER BY created_at, id",
            columns(parent)
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Update an attachment. Returns `None` if it does not exist under
    /// `parent_id`.
    pub async fn update(
        pool: &SqlitePool,
        kind: ParentKind,
        parent_id: DbId,
        id: DbId,
        input: &UpdateAttachment,
    ) -> Result<Option<Attachment>, RepoError> {
        let (table, parent) = table_for(kind);
        let cols = columns(parent);
        let query = format!(
            "UPDATE {table} SET entity_id = ?3, entity_type = ?4, url = ?5
             WHERE id = ?1 AND {parent} = ?2
               AND entity_id = ?6 AND entity_type = ?7 AND url = ?8
             RETURNING {cols}"
        );
        for _ in 0..UPDATE_ATTEMPTS {
            let Some(current) = Self::find_by_id(pool, kind, parent_id, id).await? else {
                return Ok(None);
            };
            let mut attachment = current.clone();
            apply_attachment_update(&mut attachment, input);

            let updated = sqlx::query_as::<_, Attachment>(&query)
                .bind(id)
                .bind(parent_id)
                .bind(attachment.entity_id)
                .bind(attachment.entity_type)
                .bind(&attachment.url)
                .bind(current.entity_id)
                .bind(current.entity_type)
                .bind(&current.url)
                .fetch_optional(pool)
                .await?;
            if updated.is_some() {
                return Ok(updated);
            }
        }
        let entity = match kind {
            ParentKind::Discussion => "Attachment",
            ParentKind::WorkItem => "Document",
        };
        Err(stale_row(entity, id))
    }

    pub async fn delete(
        pool: &SqlitePool,
        kind: ParentKind,
        parent_id: DbId,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (table, parent) = table_for(kind);
        let query = format!("DELETE FROM {table} WHERE id = ?1 AND {parent} = ?2");
        let result = sqlx::query(&query)
            .bind(id)
            .bind(parent_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

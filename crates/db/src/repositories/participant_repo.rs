//! Repository for the `discussion_participants` and
//! `work_item_participants` tables.

use forum_core::types::DbId;
use sqlx::SqlitePool;

use super::{stale_row, UPDATE_ATTEMPTS};
use crate::mapping::common::apply_participant_update;
use crate::models::entity_ref::ParentKind;
use crate::models::participant::{NewParticipant, Participant, UpdateParticipant};
use crate::{RepoError, SQL_NOW};

/// Table and parent column for each owner.
fn table_for(kind: ParentKind) -> (&'static str, &'static str) {
    match kind {
        ParentKind::Discussion => ("discussion_participants", "discussion_id"),
        ParentKind::WorkItem => ("work_item_participants", "work_item_id"),
    }
}

/// Column list with the parent column aliased to `parent_id`.
fn columns(parent_column: &str) -> String {
    format!(
        "id, {parent_column} AS parent_id, entity_id, entity_type, organization_type_id, \
         created_at, updated_at"
    )
}

/// Provides CRUD operations for participants of either owner.
pub struct ParticipantRepo;

impl ParticipantRepo {
    pub async fn create(
        pool: &SqlitePool,
        kind: ParentKind,
        input: &NewParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let (table, parent) = table_for(kind);
        let query = format!(
            "INSERT INTO {table} ({parent}, entity_id, entity_type, organization_type_id)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {}",
            columns(parent)
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(input.parent_id)
            .bind(input.entity_id)
            .bind(input.entity_type)
            .bind(input.organization_type_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        kind: ParentKind,
        parent_id: DbId,
        id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let (table, parent) = table_for(kind);
        let query = format!(
            "SELECT {} FROM {table} WHERE id = ?1 AND {parent} = ?2",
            columns(parent)
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(parent_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_parent(
        pool: &SqlitePool,
        kind: ParentKind,
        parent_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let (table, parent) = table_for(kind);
        let query = format!(
            "SELECT {} FROM {table} WHERE {parent} = ?1 ORDER BY created_at, id",
            columns(parent)
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Update a participant. Returns `None` if it does not exist under
    /// `parent_id`.
    pub async fn update(
        pool: &SqlitePool,
        kind: ParentKind,
        parent_id: DbId,
        id: DbId,
        input: &UpdateParticipant,
    ) -> Result<Option<Participant>, RepoError> {
        let (table, parent) = table_for(kind);
        let cols = columns(parent);
        let query = format!(
            "UPDATE {table} SET
                entity_id = ?3,
                entity_type = ?4,
                organization_type_id = ?5,
                updated_at = {SQL_NOW}
             WHERE id = ?1 AND {parent} = ?2
               AND entity_id = ?6
               AND entity_type = ?7
               AND organization_type_id IS ?8
             RETURNING {cols}"
        );
        for _ in 0..UPDATE_ATTEMPTS {
            let Some(current) = Self::find_by_id(pool, kind, parent_id, id).await? else {
                return Ok(None);
            };
            let mut participant = current.clone();
            apply_participant_update(&mut participant, input);

            let updated = sqlx::query_as::<_, Participant>(&query)
                .bind(id)
                .bind(parent_id)
                .bind(participant.entity_id)
                .bind(participant.entity_type)
                .bind(participant.organization_type_id)
                .bind(current.entity_id)
                .bind(current.entity_type)
                .bind(current.organization_type_id)
                .fetch_optional(pool)
                .await?;
            if updated.is_some() {
                return Ok(updated);
            }
        }
        Err(stale_row("Participant", id))
    }

    /// Remove a participant. Returns `true` if a row was removed.
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

//! Participant entity model and DTOs.
//!
//! Discussions and work items each keep participants in their own table
//! (`discussion_participants`, `work_item_participants`). Both tables share
//! one row shape; `parent_id` is the owning discussion or work item.

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::entity_ref::EntityType;

/// A participant row. The referenced entity is not owned.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub parent_id: DbId,
    pub entity_id: DbId,
    pub entity_type: EntityType,
    pub organization_type_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Insertable participant.
#[derive(Debug, Clone, PartialEq)]
pub struct NewParticipant {
    pub parent_id: DbId,
    pub entity_id: DbId,
    pub entity_type: EntityType,
    pub organization_type_id: Option<DbId>,
}

/// DTO for adding a participant.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParticipant {
    pub entity_id: DbId,
    pub entity_type: EntityType,
    pub organization_type_id: Option<DbId>,
}

/// DTO for updating a participant. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateParticipant {
    pub entity_id: Option<DbId>,
    pub entity_type: Option<EntityType>,
    pub organization_type_id: Option<DbId>,
}

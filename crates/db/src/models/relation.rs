//! Relation entity model and DTOs.

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::entity_ref::RelationType;

/// A directed edge `from_work_item_id -> to_work_item_id`.
///
/// Owned by neither endpoint; an endpoint cannot be hard-deleted while an
/// edge references it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Relation {
    pub id: DbId,
    pub from_work_item_id: DbId,
    pub to_work_item_id: DbId,
    pub relation_type: RelationType,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRelation {
    pub from_work_item_id: DbId,
    pub to_work_item_id: DbId,
    pub relation_type: RelationType,
}

/// DTO for creating a relation. The source work item comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRelation {
    pub to_work_item_id: DbId,
    pub relation_type: RelationType,
}

/// DTO for updating a relation. Endpoints are fixed; only the kind changes.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRelation {
    pub relation_type: Option<RelationType>,
}

//! Attachment entity model and DTOs.
//!
//! Attachments hang off discussions (`attachments`); the same shape hangs
//! off work items as documents (`documents`).

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::entity_ref::EntityType;

/// An attachment or document row.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub parent_id: DbId,
    pub entity_id: DbId,
    pub entity_type: EntityType,
    pub url: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttachment {
    pub parent_id: DbId,
    pub entity_id: DbId,
    pub entity_type: EntityType,
    pub url: String,
}

/// DTO for attaching a URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttachment {
    pub entity_id: DbId,
    pub entity_type: EntityType,
    #[validate(url, length(max = 2048))]
    pub url: String,
}

/// DTO for updating an attachment. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAttachment {
    pub entity_id: Option<DbId>,
    pub entity_type: Option<EntityType>,
    #[validate(url, length(max = 2048))]
    pub url: Option<String>,
}

//! Organization type entity model and DTOs.

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `organization_types` table.
///
/// Participants reference a type with restrict-on-delete: a type cannot be
/// removed while any participant still points at it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrganizationType {
    pub id: DbId,
    pub type_label: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a new organization type.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganizationType {
    #[validate(length(min = 1, max = 100))]
    pub type_label: String,
}

/// DTO for updating an organization type. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOrganizationType {
    #[validate(length(min = 1, max = 100))]
    pub type_label: Option<String>,
}

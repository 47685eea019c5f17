//! Response entity model and DTOs.
//!
//! A response is a reply inside a discussion. The discussion owns it: hard
//! deleting the discussion removes its responses.

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A response row from the `responses` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Response {
    pub id: DbId,
    pub discussion_id: DbId,
    pub user_id: DbId,
    pub comment: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Insertable response. The parent comes from the request path.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResponse {
    pub discussion_id: DbId,
    pub user_id: DbId,
    pub comment: String,
    pub status: String,
}

/// DTO for creating a new response.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateResponse {
    pub user_id: DbId,
    #[validate(length(min = 1, max = 10000))]
    pub comment: String,
    /// Defaults to `Open` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing response. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateResponse {
    #[validate(length(min = 1, max = 10000))]
    pub comment: Option<String>,
    pub status: Option<String>,
}

/// A response as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseToReturn {
    pub id: DbId,
    pub discussion_id: DbId,
    pub user_id: DbId,
    /// Display name of the author.
    pub username: String,
    pub comment: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

//! Comment entity model and DTOs.
//!
//! A comment is a reply on a work item. The work item owns it: hard
//! deleting the work item removes its comments.

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A comment row from the `comments` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub work_item_id: DbId,
    pub user_id: DbId,
    pub comment: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Insertable comment. The parent comes from the request path.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub work_item_id: DbId,
    pub user_id: DbId,
    pub comment: String,
    pub status: String,
}

/// DTO for creating a new comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    pub user_id: DbId,
    #[validate(length(min = 1, max = 10000))]
    pub comment: String,
    /// Defaults to `Open` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing comment. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateComment {
    #[validate(length(min = 1, max = 10000))]
    pub comment: Option<String>,
    pub status: Option<String>,
}

/// A comment as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentToReturn {
    pub id: DbId,
    pub work_item_id: DbId,
    pub user_id: DbId,
    /// Display name of the author.
    pub username: String,
    pub comment: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

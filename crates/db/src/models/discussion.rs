//! Discussion entity model and DTOs.

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A discussion row from the `discussions` table.
///
/// `status` is the stored label. Readers see the derived status produced by
/// [`crate::mapping::discussion`], which may differ once `end_date` passes.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Discussion {
    pub id: DbId,
    pub subject: String,
    pub comment: String,
    pub user_id: DbId,
    pub status: String,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Insertable discussion: every column the caller controls.
///
/// `id` and `created_at` are assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscussion {
    pub subject: String,
    pub comment: String,
    pub user_id: DbId,
    pub status: String,
    pub end_date: Option<Timestamp>,
}

/// DTO for creating a new discussion.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDiscussion {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 10000))]
    pub comment: String,
    pub user_id: DbId,
    /// Defaults to `Open` if omitted.
    pub status: Option<String>,
    pub end_date: Option<Timestamp>,
}

/// DTO for updating an existing discussion. All fields are optional.
///
/// The author (`user_id`) is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateDiscussion {
    #[validate(length(min = 1, max = 200))]
    pub subject: Option<String>,
    #[validate(length(max = 10000))]
    pub comment: Option<String>,
    pub status: Option<String>,
    pub end_date: Option<Timestamp>,
}

/// A discussion as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscussionToReturn {
    pub id: DbId,
    pub subject: String,
    pub comment: String,
    pub user_id: DbId,
    /// Display name of the author.
    pub username: String,
    /// Derived status at the time of the request.
    pub status: String,
    pub created_at: Timestamp,
    pub end_date: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// A discussion as listed, with the size of its response collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscussionForList {
    pub id: DbId,
    pub subject: String,
    pub comment: String,
    pub user_id: DbId,
    pub username: String,
    pub status: String,
    pub created_at: Timestamp,
    pub end_date: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub responses_count: usize,
}

/// Filters for listing discussions.
#[derive(Debug, Clone)]
pub struct DiscussionFilter {
    /// Exact match on the stored label.
    pub status: Option<String>,
    /// Include rows whose stored label is `Deleted`.
    pub include_deleted: bool,
    pub limit: i64,
    pub offset: i64,
}

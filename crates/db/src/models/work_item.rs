//! Work item entity model and DTOs.

use forum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A work item row from the `work_items` table.
///
/// `status` is the stored label. Readers see the derived status produced by
/// [`crate::mapping::work_item`], which may differ once `end_date` passes.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WorkItem {
    pub id: DbId,
    pub subject: String,
    pub comment: String,
    pub user_id: DbId,
    pub status: String,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// Insertable work item: every column the caller controls.
///
/// `id` and `created_at` are assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkItem {
    pub subject: String,
    pub comment: String,
    pub user_id: DbId,
    pub status: String,
    pub end_date: Option<Timestamp>,
}

/// DTO for creating a new work item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkItem {
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

/// DTO for updating an existing work item. All fields are optional.
///
/// The author (`user_id`) is fixed at creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateWorkItem {
    #[validate(length(min = 1, max = 200))]
    pub subject: Option<String>,
    #[validate(length(max = 10000))]
    pub comment: Option<String>,
    pub status: Option<String>,
    pub end_date: Option<Timestamp>,
}

/// A work item as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkItemToReturn {
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

/// A work item as listed, with the size of its comment collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkItemForList {
    pub id: DbId,
    pub subject: String,
    pub comment: String,
    pub user_id: DbId,
    pub username: String,
    pub status: String,
    pub created_at: Timestamp,
    pub end_date: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub comments_count: usize,
}

/// Filters for listing work_items.
#[derive(Debug, Clone)]
pub struct WorkItemFilter {
    /// Exact match on the stored label.
    pub status: Option<String>,
    /// Include rows whose stored label is `Deleted`.
    pub include_deleted: bool,
    pub limit: i64,
    pub offset: i64,
}

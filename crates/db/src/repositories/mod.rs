//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Updates load the row,
//! apply the patch through [`crate::mapping`], and write it back with a
//! single statement. Rows with more than one writable column are written
//! compare-and-set: the `UPDATE` matches the values that were read, and a
//! miss means another writer got there first.

pub mod attachment_repo;
pub mod comment_repo;
pub mod discussion_repo;
pub mod organization_type_repo;
pub mod participant_repo;
pub mod relation_repo;
pub mod response_repo;
pub mod user_repo;
pub mod work_item_repo;

pub use attachment_repo::AttachmentRepo;
pub use comment_repo::CommentRepo;
pub use discussion_repo::DiscussionRepo;
pub use organization_type_repo::OrganizationTypeRepo;
pub use participant_repo::ParticipantRepo;
pub use relation_repo::RelationRepo;
pub use response_repo::ResponseRepo;
pub use user_repo::UserRepo;
pub use work_item_repo::WorkItemRepo;

use forum_core::error::CoreError;
use forum_core::types::DbId;

use crate::RepoError;

/// Compare-and-set rounds an update makes before giving up.
pub(crate) const UPDATE_ATTEMPTS: usize = 32;

/// The row kept changing under a compare-and-set update.
pub(crate) fn stale_row(entity: &'static str, id: DbId) -> RepoError {
    tracing::warn!(entity, id, "Update lost every compare-and-set round");
    RepoError::Core(CoreError::Conflict(format!(
        "{entity} {id} was modified concurrently"
    )))
}

pub mod attachment;
pub mod comment;
pub mod discussion;
pub mod organization_type;
pub mod participant;
pub mod relation;
pub mod response;
pub mod user;
pub mod work_item;

use std::collections::HashMap;

use forum_core::error::CoreError;
use forum_core::status;
use forum_core::types::DbId;
use forum_db::models::entity_ref::ParentKind;
use forum_db::models::user::User;
use forum_db::repositories::{DiscussionRepo, OrganizationTypeRepo, UserRepo, WorkItemRepo};
use forum_db::DbPool;

use crate::error::{AppError, AppResult};

/// Load the user a new row will be attributed to, or 404.
pub(crate) async fn require_user(pool: &DbPool, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))
}

/// Load the authors of a batch of rows, keyed by id.
///
/// Ids are deduplicated; missing users are simply absent from the map and
/// surface later as a projection error.
pub(crate) async fn load_users<I>(pool: &DbPool, ids: I) -> AppResult<HashMap<DbId, User>>
where
    I: IntoIterator<Item = DbId>,
{
    let mut ids: Vec<DbId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    let users = UserRepo::find_by_ids(pool, &ids).await?;
    Ok(users.into_iter().map(|u| (u.id, u)).collect())
}

/// 404 unless the owning discussion or work item exists.
///
/// Returns the parent's stored status label.
pub(crate) async fn require_parent(pool: &DbPool, kind: ParentKind, id: DbId) -> AppResult<String> {
    let stored = match kind {
        ParentKind::Discussion => DiscussionRepo::find_by_id(pool, id)
            .await?
            .map(|d| d.status),
        ParentKind::WorkItem => WorkItemRepo::find_by_id(pool, id).await?.map(|w| w.status),
    };
    stored.ok_or_else(|| AppError::not_found(kind.entity_name(), id))
}

/// Like [`require_parent`], but also refuses parents that are soft-deleted.
pub(crate) async fn require_live_parent(
    pool: &DbPool,
    kind: ParentKind,
    id: DbId,
) -> AppResult<()> {
    let stored = require_parent(pool, kind, id).await?;
    if status::is_deleted(&stored) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "{} {id} is deleted",
            kind.entity_name()
        ))));
    }
    Ok(())
}

/// 404 when an organization type is named but does not exist.
pub(crate) async fn require_organization_type(pool: &DbPool, id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = id {
        OrganizationTypeRepo::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("OrganizationType", id))?;
    }
    Ok(())
}

/// Check a client-supplied status on a create DTO.
pub(crate) fn check_initial_status(label: Option<&str>) -> AppResult<()> {
    if let Some(label) = label {
        status::validate_label(label)?;
    }
    Ok(())
}

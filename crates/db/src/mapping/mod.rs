//! Projections between rows and DTOs.
//!
//! Every function here is pure: it never queries the database and never
//! reads the wall clock. Callers load the rows a projection needs (the
//! author, the child collection) and pass the current time in.
//!
//! - `to_return` / `for_list` build client shapes from loaded rows.
//! - `new_*` turn a create DTO into an insertable, filling defaults.
//! - `apply_*update` overwrite only the fields present on an update DTO.
//!   Where the row carries a status, the change is checked against the
//!   label being replaced.

pub mod common;
pub mod discussion;
pub mod work_item;

use forum_core::error::CoreError;
use forum_core::types::DbId;

use crate::models::user::User;

/// Resolve the display name of the user a row is attributed to.
///
/// Fails with [`CoreError::MissingReference`] when the caller did not load
/// the user, or loaded a different one.
pub(crate) fn author_name(user: Option<&User>, user_id: DbId) -> Result<String, CoreError> {
    match user {
        Some(u) if u.id == user_id => Ok(u.display_name.clone()),
        _ => Err(CoreError::MissingReference {
            entity: "User",
            id: user_id,
        }),
    }
}

/// Resolve a create DTO's optional status to the stored label.
pub(crate) fn initial_status(status: Option<&str>) -> String {
    status
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| forum_core::status::STATUS_OPEN.to_string())
}

/// Replace `stored` with the trimmed `requested` label, if any.
///
/// The check runs against the label actually being overwritten, so a row
/// that became `Deleted` after the caller last saw it stays `Deleted`.
pub(crate) fn apply_status(stored: &mut String, requested: Option<&str>) -> Result<(), CoreError> {
    if let Some(next) = requested {
        let next = next.trim();
        forum_core::status::validate_transition(stored, next)?;
        *stored = next.to_string();
    }
    Ok(())
}

//! Status labels for discussions, responses, work items and comments.
//!
//! The stored label is free text. Three labels carry meaning:
//!
//! ```text
//! Open ──► Closed ──► Deleted
//!   └─────────────────────┘
//! ```
//!
//! `Deleted` is terminal. `Closed` is also a *display* state: an `Open`
//! row whose end date has passed is shown as `Closed` while the stored
//! label stays `Open`.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default label for newly created rows.
pub const STATUS_OPEN: &str = "Open";

/// Closed manually, or shown as closed because the end date passed.
pub const STATUS_CLOSED: &str = "Closed";

/// Soft-deleted. Never changes once set.
pub const STATUS_DELETED: &str = "Deleted";

/// Maximum accepted length of a status label.
pub const MAX_STATUS_LEN: usize = 50;

/// Compute the status shown to readers at time `now`.
///
/// - a stored `Deleted` label is returned unchanged, whatever the end date;
/// - otherwise, if `end_date` is set and `now` is at or after it, `Closed`;
/// - otherwise the stored label unchanged.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use forum_core::status::effective_status;
///
/// let end = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// let after = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
/// let before = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
///
/// assert_eq!(effective_status("Open", Some(end), after), "Closed");
/// assert_eq!(effective_status("Open", Some(end), before), "Open");
/// ```
pub fn effective_status(stored: &str, end_date: Option<Timestamp>, now: Timestamp) -> String {
    if stored == STATUS_DELETED {
        return stored.to_string();
    }
    match end_date {
        Some(end) if now >= end => STATUS_CLOSED.to_string(),
        _ => stored.to_string(),
    }
}

/// Whether the stored label marks the row as soft-deleted.
pub fn is_deleted(stored: &str) -> bool {
    stored == STATUS_DELETED
}

/// Validate a label supplied by a client.
pub fn validate_label(label: &str) -> Result<(), CoreError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "status must not be blank".to_string(),
        ));
    }
    if trimmed.len() > MAX_STATUS_LEN {
        return Err(CoreError::Validation(format!(
            "status must be at most {MAX_STATUS_LEN} characters"
        )));
    }
    Ok(())
}

/// Check that a stored label may be replaced by `next`.
///
/// Any label may move to any other except out of `Deleted`.
pub fn validate_transition(current: &str, next: &str) -> Result<(), CoreError> {
    validate_label(next)?;
    if is_deleted(current) && next != STATUS_DELETED {
        return Err(CoreError::Conflict(format!(
            "cannot change status from {STATUS_DELETED} to {next}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn deleted_ignores_end_date() {
        let now = at(2020, 6, 1);
        assert_eq!(effective_status("Deleted", None, now), "Deleted");
        assert_eq!(effective_status("Deleted", Some(at(2020, 1, 1)), now), "Deleted");
        assert_eq!(effective_status("Deleted", Some(at(2021, 1, 1)), now), "Deleted");
    }

    #[test]
    fn open_past_end_date_is_closed() {
        assert_eq!(
            effective_status("Open", Some(at(2020, 1, 1)), at(2020, 6, 1)),
            "Closed"
        );
    }

    #[test]
    fn end_date_boundary_is_closed() {
        let end = at(2020, 1, 1);
        assert_eq!(effective_status("Open", Some(end), end), "Closed");
        assert_eq!(
            effective_status("Open", Some(end), end - Duration::seconds(1)),
            "Open"
        );
    }

    #[test]
    fn open_without_end_date_is_unchanged() {
        assert_eq!(effective_status("Open", None, at(2020, 6, 1)), "Open");
    }

    #[test]
    fn open_before_end_date_is_unchanged() {
        assert_eq!(
            effective_status("Open", Some(at(2020, 1, 1)), at(2019, 1, 1)),
            "Open"
        );
    }

    #[test]
    fn custom_label_expires_too() {
        assert_eq!(
            effective_status("Pending review", Some(at(2020, 1, 1)), at(2020, 2, 1)),
            "Closed"
        );
        assert_eq!(
            effective_status("Pending review", None, at(2020, 2, 1)),
            "Pending review"
        );
    }

    #[test]
    fn blank_label_is_rejected() {
        assert_matches!(validate_label("   "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_label(&"x".repeat(MAX_STATUS_LEN + 1)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_label("Open").is_ok());
    }

    #[test]
    fn deleted_is_terminal() {
        assert_matches!(
            validate_transition("Deleted", "Open"),
            Err(CoreError::Conflict(_))
        );
        assert!(validate_transition("Deleted", "Deleted").is_ok());
    }

    #[test]
    fn open_and_closed_move_freely() {
        assert!(validate_transition("Open", "Closed").is_ok());
        assert!(validate_transition("Closed", "Open").is_ok());
        assert!(validate_transition("Open", "Deleted").is_ok());
        assert!(validate_transition("Closed", "Deleted").is_ok());
    }
}

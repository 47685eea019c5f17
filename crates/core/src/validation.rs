//! Input checks that field-level derive attributes cannot express.

use crate::error::CoreError;
use crate::types::DbId;

/// Reject text that is empty once surrounding whitespace is removed.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

/// Same as [`require_text`] for optional patch fields; `None` passes.
pub fn require_text_if_present(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => require_text(field, v),
        None => Ok(()),
    }
}

/// A relation must connect two distinct work items.
pub fn validate_relation_endpoints(from: DbId, to: DbId) -> Result<(), CoreError> {
    if from == to {
        return Err(CoreError::Validation(format!(
            "work item {from} cannot relate to itself"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn whitespace_only_is_blank() {
        assert_matches!(
            require_text("subject", " \t\n"),
            Err(CoreError::Validation(msg)) if msg == "subject must not be blank"
        );
        assert!(require_text("subject", " hi ").is_ok());
    }

    #[test]
    fn absent_patch_field_passes() {
        assert!(require_text_if_present("comment", None).is_ok());
        assert_matches!(
            require_text_if_present("comment", Some("")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn self_relation_is_rejected() {
        assert_matches!(validate_relation_endpoints(4, 4), Err(CoreError::Validation(_)));
        assert!(validate_relation_endpoints(4, 5).is_ok());
    }
}

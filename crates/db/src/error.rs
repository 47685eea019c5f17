use forum_core::error::CoreError;
use sqlx::error::{DatabaseError, ErrorKind};

/// Error returned by repository writes that apply domain rules.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The patch was rejected against the row it would have replaced.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Extended result code for a violated `REFERENCES` clause on insert/update.
const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";

/// Extended result code SQLite uses when `ON DELETE RESTRICT` blocks a delete.
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

/// Whether a database error is a broken or still-referenced foreign key.
///
/// sqlx only classifies code 787 as [`ErrorKind::ForeignKeyViolation`];
/// a restricted delete surfaces as [`ErrorKind::Other`] with code 1811.
pub fn is_foreign_key_violation(err: &dyn DatabaseError) -> bool {
    matches!(err.kind(), ErrorKind::ForeignKeyViolation)
        || matches!(
            err.code().as_deref(),
            Some(SQLITE_CONSTRAINT_FOREIGNKEY | SQLITE_CONSTRAINT_TRIGGER)
        )
}

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A projection was asked to run without a reference it depends on.
    ///
    /// Callers resolve references before projecting, so this is a defect
    /// rather than a client error.
    #[error("Missing reference: {entity} with id {id} was not loaded")]
    MissingReference { entity: &'static str, id: DbId },
}

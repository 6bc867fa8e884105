use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Too few usable values survived filtering for a QC test.
    ///
    /// Always recoverable by the caller (re-prompt for input); never a
    /// system fault.
    #[error("Insufficient data for {test}: {required} valid values required, {found} supplied")]
    InsufficientData {
        test: &'static str,
        required: usize,
        found: usize,
    },
}

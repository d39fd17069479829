/// Domain-level error taxonomy shared by the repository and HTTP layers.
///
/// Maps one-to-one onto the HTTP statuses the frontend contract expects:
/// `NotFound` -> 404, `Validation` -> 400, `Conflict` -> 409,
/// `Unauthorized` -> 401, `Unavailable` -> 503, `Internal` -> 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} ({key})")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with a numeric id key.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        CoreError::NotFound {
            entity,
            key: id.to_string(),
        }
    }
}

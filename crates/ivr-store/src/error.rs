//! Error types for IVR storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Table the lookup ran against.
        entity: &'static str,
        /// Key that was looked up.
        id: String,
    },

    /// The store is unavailable (e.g. closed or poisoned).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

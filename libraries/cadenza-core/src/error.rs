/// Core error types for Cadenza
use thiserror::Error;

/// Result type alias using `CadenzaError`
pub type Result<T> = std::result::Result<T, CadenzaError>;

/// Core error type for Cadenza
///
/// Store, playlist and playback operations surface every failure through this
/// type; none of them retries on its own.
#[derive(Error, Debug)]
pub enum CadenzaError {
    /// Operation referenced a missing id
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique-constraint violation
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Audio or image path could not be read
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Backing store unreachable
    #[error("Store unreachable: {0}")]
    StoreConnectivity(String),

    /// Caller is not allowed to mutate the entity
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Input rejected before reaching the store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(String),

    /// Playback failure that is not a missing resource
    #[error("Playback error: {0}")]
    Playback(String),
}

impl CadenzaError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a duplicate error
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a resource unavailable error
    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for CadenzaError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Self::Duplicate(db.message().to_string())
            }
            sqlx::Error::RowNotFound => Self::not_found("Row", "query returned no rows"),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::WorkerCrashed => Self::StoreConnectivity(err.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

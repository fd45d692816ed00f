/// Storage bootstrap errors
use thiserror::Error;

/// Errors raised while opening or migrating the database
///
/// Query failures use `cadenza_core::CadenzaError` directly; this type only
/// covers getting a usable pool in the first place.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<StorageError> for cadenza_core::CadenzaError {
    fn from(err: StorageError) -> Self {
        cadenza_core::CadenzaError::StoreConnectivity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadenza_core::CadenzaError;

    #[test]
    fn bootstrap_errors_are_connectivity_failures() {
        let err: CadenzaError = StorageError::Connection("unable to open file".into()).into();

        assert!(matches!(err, CadenzaError::StoreConnectivity(_)));
        assert!(err.to_string().contains("unable to open file"));
    }
}

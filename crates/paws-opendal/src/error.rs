//! Storage error types.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Missing or inconsistent configuration.
    #[error("invalid storage configuration: {0}")]
    Config(String),

    /// Failed to initialize the storage backend.
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// Object not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission denied by the backend.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(opendal::Error),
}

impl StorageError {
    /// Creates a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Returns whether the error means the object does not exist.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_opendal_error_kinds() {
        let err: StorageError = opendal::Error::new(opendal::ErrorKind::NotFound, "gone").into();
        assert!(err.is_not_found());

        let err: StorageError =
            opendal::Error::new(opendal::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, StorageError::PermissionDenied(_)));

        let err: StorageError = opendal::Error::new(opendal::ErrorKind::Unexpected, "boom").into();
        assert!(matches!(err, StorageError::Backend(_)));
    }
}

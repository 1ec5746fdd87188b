//! Object storage error to HTTP error conversion.

use paws_opendal::StorageError;

use crate::handler::{Error, ErrorKind};

/// Tracing target for storage error conversions.
const TRACING_TARGET: &str = "paws_server::handler::storage";

impl From<StorageError> for Error<'static> {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(ref path) => {
                tracing::debug!(target: TRACING_TARGET, path = %path, "object not found");
                ErrorKind::NotFound
                    .with_message("File not found")
                    .with_resource("media")
            }
            StorageError::PermissionDenied(_) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "storage permission denied");
                ErrorKind::InternalServerError.into_error()
            }
            StorageError::Config(_) | StorageError::Init(_) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "storage is misconfigured");
                ErrorKind::InternalServerError.into_error()
            }
            StorageError::Backend(_) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "storage backend error");
                ErrorKind::ServiceUnavailable
                    .with_message("File storage is temporarily unavailable")
                    .with_resource("media")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_redacted() {
        let error = Error::from(StorageError::config("bucket missing"));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.context(), None);
    }
}

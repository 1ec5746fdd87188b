//! Service layer error types.
//!
//! These errors surface while the server is being assembled (configuration,
//! connecting to collaborators, loading keys) and never reach HTTP clients.
//! Request-time failures use [`handler::Error`](crate::handler::Error).

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Boxed error used as the source of a service error.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type alias for service layer operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Category of a service layer error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or invalid configuration, including session key material.
    Config,
    /// Postgres or object storage failed while the server was assembled.
    External,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "config",
            Self::External => "external service",
        })
    }
}

/// Service layer error with an optional source.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches a source error.
    #[inline]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creates a configuration error; the message should name the variable.
    #[inline]
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Creates an error blaming `service`, e.g. `postgres`.
    pub fn external(service: &str, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::External, format!("{service}: {message}"))
    }
}

impl From<paws_postgres::PgError> for Error {
    fn from(err: paws_postgres::PgError) -> Self {
        Error::external("postgres", err.to_string()).with_source(err)
    }
}

impl From<paws_opendal::StorageError> for Error {
    fn from(err: paws_opendal::StorageError) -> Self {
        match err {
            paws_opendal::StorageError::Config(ref message) => {
                Error::config(message.clone()).with_source(err)
            }
            _ => Error::external("storage", err.to_string()).with_source(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_errors_keep_their_source() {
        let source = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error = Error::external("postgres", "could not migrate").with_source(source);

        assert_eq!(error.kind(), ErrorKind::External);
        assert_eq!(error.message(), "postgres: could not migrate");
        assert!(StdError::source(&error).is_some());
        assert!(error.to_string().starts_with("external service error"));
    }

    #[test]
    fn storage_config_error_stays_config() {
        let storage = paws_opendal::StorageError::config("STORAGE_BUCKET is required");
        let error = Error::from(storage);
        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.message().contains("STORAGE_BUCKET"));
    }
}

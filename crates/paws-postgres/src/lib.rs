#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Embeds all migrations into the final binary.
pub(crate) const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
    diesel_migrations::embed_migrations!();

/// Tracing target for client initialization and configuration.
pub const TRACING_TARGET_CLIENT: &str = "paws_postgres::client";

/// Tracing target for database query operations.
pub const TRACING_TARGET_QUERY: &str = "paws_postgres::queries";

/// Tracing target for database migration operations.
pub const TRACING_TARGET_MIGRATION: &str = "paws_postgres::migrations";

/// Tracing target for connection pool operations.
pub const TRACING_TARGET_CONNECTION: &str = "paws_postgres::connection";

mod client;
pub mod model;
pub mod query;
mod schema;
pub mod types;

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::ConnectionError;
pub use diesel::result::Error as DieselError;
pub use diesel_async::AsyncPgConnection as PgConnection;
use diesel_async::pooled_connection::PoolError as DieselPoolError;
use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;

pub use crate::client::{
    ConnectionPool, MigrationResult, PgClient, PgConfig, PgConn, PooledConnection,
    run_pending_migrations,
};
use crate::types::ConstraintViolation;

/// Type-erased error type for migration failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for all PostgreSQL database operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Waiting for, creating or recycling a pooled connection timed out.
    #[error("Database operation timed out")]
    Timeout(TimeoutType),

    /// Failed to establish or maintain a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Applying embedded migrations failed.
    #[error("Database migration error: {0}")]
    Migration(BoxError),

    /// Query execution failed, including constraint violations.
    #[error("Database query error: {0}")]
    Query(#[from] DieselError),

    /// Anything not covered above.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Extracts the constraint name from a constraint violation error.
    pub fn constraint(&self) -> Option<&str> {
        let PgError::Query(DieselError::DatabaseError(_, err)) = self else {
            return None;
        };

        err.constraint_name()
    }

    /// Returns a structured constraint violation if this error represents one.
    pub fn constraint_violation(&self) -> Option<ConstraintViolation> {
        self.constraint().and_then(ConstraintViolation::new)
    }

    /// Returns whether this error is a missing row reported by `get_result`.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, PgError::Query(DieselError::NotFound))
    }

    /// Returns whether retrying the operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PgError::Timeout(_) | PgError::Connection(ConnectionError::BadConnection(_))
        )
    }
}

impl From<DeadpoolError> for PgError {
    fn from(value: DeadpoolError) -> Self {
        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                tracing::warn!(target: TRACING_TARGET_CONNECTION, error = %err, "Unexpected post-create hook error");
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                tracing::error!(target: TRACING_TARGET_CONNECTION, "No tokio runtime specified for connection pool");
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "Connection pool is closed".into(),
            )),
        }
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};

    use super::*;
    use crate::types::{UserConstraints, VolunteerStoryConstraints};

    #[derive(Debug)]
    struct FakeInfo(&'static str);

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: &'static str) -> PgError {
        PgError::Query(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(FakeInfo(constraint)),
        ))
    }

    #[test]
    fn maps_known_constraints() {
        let error = unique_violation("volunteer_stories_slug_unique_idx");
        assert_eq!(
            error.constraint_violation(),
            Some(ConstraintViolation::VolunteerStory(
                VolunteerStoryConstraints::SlugUnique
            ))
        );

        let error = unique_violation("users_email_unique_idx");
        assert_eq!(
            error.constraint_violation(),
            Some(ConstraintViolation::User(UserConstraints::EmailUnique))
        );
    }

    #[test]
    fn ignores_unknown_and_non_constraint_errors() {
        assert_eq!(unique_violation("something_else").constraint_violation(), None);
        assert_eq!(PgError::Query(DieselError::NotFound).constraint(), None);
        assert!(PgError::Query(DieselError::NotFound).is_not_found());
        assert!(PgError::Timeout(TimeoutType::Wait).is_transient());
    }
}

//! Database error to HTTP error conversion.
//!
//! Known constraint violations become client errors with a readable
//! message. Everything else is logged and answered with a bare 500 so that
//! driver messages never reach clients.

use paws_postgres::types::ConstraintViolation;
use paws_postgres::{DieselError, PgError};

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error conversions.
const TRACING_TARGET: &str = "paws_server::postgres_constraints";

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Organization(c) => c.into(),
            ConstraintViolation::User(c) => c.into(),
            ConstraintViolation::VolunteerRegistration(c) => c.into(),
            ConstraintViolation::Animal(c) => c.into(),
            ConstraintViolation::VolunteerStory(c) => c.into(),
            ConstraintViolation::ContentBlock(c) => c.into(),
            ConstraintViolation::Media(c) => c.into(),
        }
    }
}

impl From<PgError> for Error<'static> {
    fn from(error: PgError) -> Self {
        match error {
            PgError::Config(config_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %config_error,
                    "database configuration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Timeout(timeout) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    timeout = ?timeout,
                    "database timeout",
                );
                ErrorKind::ServiceUnavailable.into_error()
            }
            PgError::Connection(connection_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %connection_error,
                    "database connection error"
                );
                ErrorKind::ServiceUnavailable.into_error()
            }
            PgError::Migration(migration_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %migration_error,
                    "database migration error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Query(ref query_error) => {
                if let Some(constraint_name) = error.constraint()
                    && let Some(constraint) = ConstraintViolation::new(constraint_name)
                {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        constraint = constraint_name,
                        "query rejected by constraint"
                    );
                    return constraint.into();
                }

                tracing::error!(
                    target: TRACING_TARGET,
                    error = %query_error,
                    "query error"
                );
                ErrorKind::InternalServerError.into_error()
            }
            PgError::Unexpected(unexpected_error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %unexpected_error,
                    "unexpected database error"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

// Used only for transactions.
impl From<DieselError> for Error<'static> {
    fn from(error: DieselError) -> Self {
        PgError::from(error).into()
    }
}

#[cfg(test)]
mod tests {
    use paws_postgres::types::{
        MediaConstraints, UserConstraints, VolunteerRegistrationConstraints,
        VolunteerStoryConstraints,
    };

    use super::*;

    #[test]
    fn unique_constraints_are_conflicts() {
        let conflicts = [
            ConstraintViolation::User(UserConstraints::EmailUnique),
            ConstraintViolation::VolunteerStory(VolunteerStoryConstraints::SlugUnique),
            ConstraintViolation::VolunteerRegistration(
                VolunteerRegistrationConstraints::PendingEmailUnique,
            ),
        ];

        for constraint in conflicts {
            assert_eq!(Error::from(constraint).kind(), ErrorKind::Conflict);
        }
    }

    #[test]
    fn validation_constraints_are_bad_requests() {
        let error = Error::from(ConstraintViolation::VolunteerStory(
            VolunteerStoryConstraints::SlugFormat,
        ));
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("volunteer_story"));

        let error = Error::from(ConstraintViolation::Media(
            MediaConstraints::SizeBytesNonNegative,
        ));
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn internal_failures_are_redacted() {
        let error = Error::from(PgError::Unexpected("relation \"users\" is locked".into()));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
        assert_eq!(error.context(), None);

        let error = Error::from(PgError::Query(DieselError::NotFound));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }
}

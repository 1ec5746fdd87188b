//! Organization, user and registration constraint violation handlers.

use paws_postgres::types::{
    OrganizationConstraints, UserConstraints, VolunteerRegistrationConstraints,
};

use crate::handler::{Error, ErrorKind};

impl From<OrganizationConstraints> for Error<'static> {
    fn from(c: OrganizationConstraints) -> Self {
        let error = match c {
            OrganizationConstraints::NameNotEmpty => {
                ErrorKind::BadRequest.with_message("Organization name cannot be empty")
            }
            OrganizationConstraints::UpdatedAfterCreated => {
                ErrorKind::InternalServerError.into_error()
            }
            OrganizationConstraints::RegistrationNumberUnique => ErrorKind::Conflict
                .with_message("An organization with this registration number already exists"),
            OrganizationConstraints::EmailUnique => ErrorKind::Conflict
                .with_message("An organization with this email address already exists"),
        };

        error.with_resource("organization")
    }
}

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        let error = match c {
            UserConstraints::PasswordHashNotEmpty => {
                ErrorKind::BadRequest.with_message("Password cannot be empty")
            }
            UserConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
            UserConstraints::OrganizationAccountHasOrganization => {
                ErrorKind::InternalServerError.into_error()
            }
            UserConstraints::EmailUnique => {
                ErrorKind::Conflict.with_message("An account with this email address already exists")
            }
        };

        error.with_resource("user")
    }
}

impl From<VolunteerRegistrationConstraints> for Error<'static> {
    fn from(c: VolunteerRegistrationConstraints) -> Self {
        let error = match c {
            VolunteerRegistrationConstraints::UpdatedAfterCreated
            | VolunteerRegistrationConstraints::VerifiedHasUser => {
                ErrorKind::InternalServerError.into_error()
            }
            VolunteerRegistrationConstraints::PendingEmailUnique => ErrorKind::Conflict
                .with_message("A registration with this email address is already pending"),
        };

        error.with_resource("volunteer_registration")
    }
}

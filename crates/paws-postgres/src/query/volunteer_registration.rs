//! Volunteer registration repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewVolunteerRegistration, VolunteerRegistration};
use crate::types::Pagination;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for volunteer registration database operations.
pub trait VolunteerRegistrationRepository {
    /// Stores a new pending registration. The email is stored lowercased.
    fn create_registration(
        &mut self,
        new_registration: NewVolunteerRegistration,
    ) -> impl Future<Output = PgResult<VolunteerRegistration>> + Send;

    /// Finds a registration by its unique identifier.
    fn find_registration_by_id(
        &mut self,
        registration_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<VolunteerRegistration>>> + Send;

    /// Lists pending registrations, optionally restricted to one organization.
    fn list_pending_registrations(
        &mut self,
        organization_id: Option<Uuid>,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<VolunteerRegistration>>> + Send;

    /// Marks a pending registration approved and links the created user.
    ///
    /// Returns `None` if the registration does not exist or was already
    /// approved, so a concurrent approval cannot link a second user.
    fn mark_registration_approved(
        &mut self,
        registration_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<VolunteerRegistration>>> + Send;

    /// Deletes a pending registration. Returns whether a row was removed.
    fn reject_registration(
        &mut self,
        registration_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;
}

impl VolunteerRegistrationRepository for PgConnection {
    async fn create_registration(
        &mut self,
        mut new_registration: NewVolunteerRegistration,
    ) -> PgResult<VolunteerRegistration> {
        use schema::volunteer_registrations;

        new_registration.email = new_registration.email.trim().to_lowercase();

        diesel::insert_into(volunteer_registrations::table)
            .values(&new_registration)
            .returning(VolunteerRegistration::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_registration_by_id(
        &mut self,
        registration_id: Uuid,
    ) -> PgResult<Option<VolunteerRegistration>> {
        use schema::volunteer_registrations::{self, dsl};

        volunteer_registrations::table
            .filter(dsl::id.eq(registration_id))
            .select(VolunteerRegistration::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_pending_registrations(
        &mut self,
        organization_id: Option<Uuid>,
        pagination: Pagination,
    ) -> PgResult<Vec<VolunteerRegistration>> {
        use schema::volunteer_registrations::{self, dsl};

        let mut query = volunteer_registrations::table
            .filter(dsl::verified.eq(false))
            .into_boxed();

        if let Some(organization_id) = organization_id {
            query = query.filter(dsl::organization_id.eq(organization_id));
        }

        query
            .order(dsl::created_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(VolunteerRegistration::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn mark_registration_approved(
        &mut self,
        registration_id: Uuid,
        user_id: Uuid,
    ) -> PgResult<Option<VolunteerRegistration>> {
        use schema::volunteer_registrations::{self, dsl};

        diesel::update(
            volunteer_registrations::table
                .filter(dsl::id.eq(registration_id))
                .filter(dsl::verified.eq(false)),
        )
        .set((dsl::verified.eq(true), dsl::user_id.eq(Some(user_id))))
        .returning(VolunteerRegistration::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)
    }

    async fn reject_registration(&mut self, registration_id: Uuid) -> PgResult<bool> {
        use schema::volunteer_registrations::{self, dsl};

        let deleted = diesel::delete(
            volunteer_registrations::table
                .filter(dsl::id.eq(registration_id))
                .filter(dsl::verified.eq(false)),
        )
        .execute(self)
        .await
        .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}

//! Organization repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewOrganization, Organization, UpdateOrganization};
use crate::types::{Pagination, UserRole};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for organization database operations.
pub trait OrganizationRepository {
    /// Registers a new, unverified organization.
    ///
    /// The email is stored lowercased.
    fn create_organization(
        &mut self,
        new_organization: NewOrganization,
    ) -> impl Future<Output = PgResult<Organization>> + Send;

    /// Finds an organization by its unique identifier.
    fn find_organization_by_id(
        &mut self,
        organization_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Organization>>> + Send;

    /// Lists organizations ordered by name.
    fn list_organizations(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Organization>>> + Send;

    /// Applies a partial update and returns the updated row.
    ///
    /// Returns `None` when the organization does not exist. An empty
    /// changeset returns the current row untouched.
    fn update_organization(
        &mut self,
        organization_id: Uuid,
        updates: UpdateOrganization,
    ) -> impl Future<Output = PgResult<Option<Organization>>> + Send;

    /// Permanently deletes an organization.
    ///
    /// Returns whether a row was removed.
    fn delete_organization(
        &mut self,
        organization_id: Uuid,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Marks an organization and all of its organization accounts verified.
    fn verify_organization(
        &mut self,
        organization_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Organization>>> + Send;
}

impl OrganizationRepository for PgConnection {
    async fn create_organization(
        &mut self,
        mut new_organization: NewOrganization,
    ) -> PgResult<Organization> {
        use schema::organizations;

        new_organization.email = new_organization.email.trim().to_lowercase();
        new_organization.name = new_organization.name.trim().to_owned();

        diesel::insert_into(organizations::table)
            .values(&new_organization)
            .returning(Organization::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_organization_by_id(
        &mut self,
        organization_id: Uuid,
    ) -> PgResult<Option<Organization>> {
        use schema::organizations::{self, dsl};

        organizations::table
            .filter(dsl::id.eq(organization_id))
            .select(Organization::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_organizations(&mut self, pagination: Pagination) -> PgResult<Vec<Organization>> {
        use schema::organizations::{self, dsl};

        organizations::table
            .order((dsl::name.asc(), dsl::id.asc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Organization::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_organization(
        &mut self,
        organization_id: Uuid,
        mut updates: UpdateOrganization,
    ) -> PgResult<Option<Organization>> {
        use schema::organizations::{self, dsl};

        if updates.is_empty() {
            return self.find_organization_by_id(organization_id).await;
        }

        if let Some(email) = updates.email.as_mut() {
            *email = email.trim().to_lowercase();
        }

        diesel::update(organizations::table.filter(dsl::id.eq(organization_id)))
            .set(&updates)
            .returning(Organization::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_organization(&mut self, organization_id: Uuid) -> PgResult<bool> {
        use schema::organizations::{self, dsl};

        let deleted = diesel::delete(organizations::table.filter(dsl::id.eq(organization_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    async fn verify_organization(
        &mut self,
        organization_id: Uuid,
    ) -> PgResult<Option<Organization>> {
        use schema::{organizations, users};

        let organization = diesel::update(
            organizations::table.filter(organizations::dsl::id.eq(organization_id)),
        )
        .set(organizations::dsl::verified.eq(true))
        .returning(Organization::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)?;

        if organization.is_some() {
            let accounts = diesel::update(
                users::table
                    .filter(users::dsl::organization_id.eq(organization_id))
                    .filter(users::dsl::role.eq(UserRole::Organization)),
            )
            .set(users::dsl::verified.eq(true))
            .execute(self)
            .await
            .map_err(PgError::from)?;

            tracing::debug!(
                target: TRACING_TARGET_QUERY,
                organization_id = %organization_id,
                accounts,
                "Verified organization accounts"
            );
        }

        Ok(organization)
    }
}

//! User repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewUser, UpdateUser, User};
use crate::types::{Pagination, UserRole};
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for user database operations.
pub trait UserRepository {
    /// Creates a new user. The email is stored lowercased.
    fn create_user(&mut self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Finds a user by its unique identifier.
    fn find_user_by_id(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Finds a user by email, case-insensitively.
    fn find_user_by_email(
        &mut self,
        email: &str,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Returns the organization a user belongs to.
    ///
    /// `None` covers both a missing user and a user without organization.
    fn find_user_organization_id(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Uuid>>> + Send;

    /// Checks whether an email already belongs to a user.
    fn email_exists(&mut self, email: &str) -> impl Future<Output = PgResult<bool>> + Send;

    /// Applies a partial profile update.
    ///
    /// Returns `None` when the user does not exist. An empty changeset
    /// returns the current row untouched.
    fn update_user(
        &mut self,
        user_id: Uuid,
        updates: UpdateUser,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Removes a user from their organization without deleting the account.
    fn detach_user_from_organization(
        &mut self,
        user_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<User>>> + Send;

    /// Permanently deletes a user. Returns whether a row was removed.
    fn delete_user(&mut self, user_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists volunteers, optionally restricted to one organization.
    fn list_volunteers(
        &mut self,
        organization_id: Option<Uuid>,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<User>>> + Send;
}

impl UserRepository for PgConnection {
    async fn create_user(&mut self, mut new_user: NewUser) -> PgResult<User> {
        use schema::users;

        new_user.email = new_user.email.trim().to_lowercase();

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_user_by_id(&mut self, user_id: Uuid) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_by_email(&mut self, email: &str) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::email.eq(email.trim().to_lowercase()))
            .select(User::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_user_organization_id(&mut self, user_id: Uuid) -> PgResult<Option<Uuid>> {
        use schema::users::{self, dsl};

        let organization_id: Option<Option<Uuid>> = users::table
            .filter(dsl::id.eq(user_id))
            .select(dsl::organization_id)
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(organization_id.flatten())
    }

    async fn email_exists(&mut self, email: &str) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let count: i64 = users::table
            .filter(dsl::email.eq(email.trim().to_lowercase()))
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn update_user(&mut self, user_id: Uuid, updates: UpdateUser) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        if updates.is_empty() {
            return self.find_user_by_id(user_id).await;
        }

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(&updates)
            .returning(User::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn detach_user_from_organization(&mut self, user_id: Uuid) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(dsl::organization_id.eq(None::<Uuid>))
            .returning(User::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_user(&mut self, user_id: Uuid) -> PgResult<bool> {
        use schema::users::{self, dsl};

        let deleted = diesel::delete(users::table.filter(dsl::id.eq(user_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    async fn list_volunteers(
        &mut self,
        organization_id: Option<Uuid>,
        pagination: Pagination,
    ) -> PgResult<Vec<User>> {
        use schema::users::{self, dsl};

        let mut query = users::table
            .filter(dsl::role.eq(UserRole::Volunteer))
            .into_boxed();

        if let Some(organization_id) = organization_id {
            query = query.filter(dsl::organization_id.eq(organization_id));
        }

        query
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(User::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }
}

//! Volunteer story repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewVolunteerStory, UpdateVolunteerStory, VolunteerStory};
use crate::types::Pagination;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for volunteer story database operations.
pub trait VolunteerStoryRepository {
    /// Creates a new story.
    fn create_story(
        &mut self,
        new_story: NewVolunteerStory,
    ) -> impl Future<Output = PgResult<VolunteerStory>> + Send;

    /// Finds a story by its unique identifier.
    fn find_story_by_id(
        &mut self,
        story_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<VolunteerStory>>> + Send;

    /// Finds a story by its slug.
    fn find_story_by_slug(
        &mut self,
        slug: &str,
    ) -> impl Future<Output = PgResult<Option<VolunteerStory>>> + Send;

    /// Checks whether a slug is taken by a story other than `exclude_story_id`.
    fn slug_exists(
        &mut self,
        slug: &str,
        exclude_story_id: Option<Uuid>,
    ) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists stories newest first, optionally only featured ones.
    fn list_stories(
        &mut self,
        featured_only: bool,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<VolunteerStory>>> + Send;

    /// Applies a partial update.
    ///
    /// Returns `None` when the story does not exist. An empty changeset
    /// returns the current row untouched.
    fn update_story(
        &mut self,
        story_id: Uuid,
        updates: UpdateVolunteerStory,
    ) -> impl Future<Output = PgResult<Option<VolunteerStory>>> + Send;

    /// Permanently deletes a story. Returns whether a row was removed.
    fn delete_story(&mut self, story_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl VolunteerStoryRepository for PgConnection {
    async fn create_story(&mut self, new_story: NewVolunteerStory) -> PgResult<VolunteerStory> {
        use schema::volunteer_stories;

        diesel::insert_into(volunteer_stories::table)
            .values(&new_story)
            .returning(VolunteerStory::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_story_by_id(&mut self, story_id: Uuid) -> PgResult<Option<VolunteerStory>> {
        use schema::volunteer_stories::{self, dsl};

        volunteer_stories::table
            .filter(dsl::id.eq(story_id))
            .select(VolunteerStory::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn find_story_by_slug(&mut self, slug: &str) -> PgResult<Option<VolunteerStory>> {
        use schema::volunteer_stories::{self, dsl};

        volunteer_stories::table
            .filter(dsl::slug.eq(slug))
            .select(VolunteerStory::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn slug_exists(&mut self, slug: &str, exclude_story_id: Option<Uuid>) -> PgResult<bool> {
        use schema::volunteer_stories::{self, dsl};

        let mut query = volunteer_stories::table
            .filter(dsl::slug.eq(slug))
            .into_boxed();

        if let Some(story_id) = exclude_story_id {
            query = query.filter(dsl::id.ne(story_id));
        }

        let count: i64 = query
            .count()
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        Ok(count > 0)
    }

    async fn list_stories(
        &mut self,
        featured_only: bool,
        pagination: Pagination,
    ) -> PgResult<Vec<VolunteerStory>> {
        use schema::volunteer_stories::{self, dsl};

        let mut query = volunteer_stories::table.into_boxed();
        if featured_only {
            query = query.filter(dsl::featured.eq(true));
        }

        query
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(VolunteerStory::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_story(
        &mut self,
        story_id: Uuid,
        updates: UpdateVolunteerStory,
    ) -> PgResult<Option<VolunteerStory>> {
        use schema::volunteer_stories::{self, dsl};

        if updates.is_empty() {
            return self.find_story_by_id(story_id).await;
        }

        diesel::update(volunteer_stories::table.filter(dsl::id.eq(story_id)))
            .set(&updates)
            .returning(VolunteerStory::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_story(&mut self, story_id: Uuid) -> PgResult<bool> {
        use schema::volunteer_stories::{self, dsl};

        let deleted = diesel::delete(volunteer_stories::table.filter(dsl::id.eq(story_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}

//! Volunteer story model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::volunteer_stories;

/// Published story, optionally authored by a volunteer.
///
/// Stories without a `volunteer_id` have no individual owner and can only
/// be changed by administrators.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = volunteer_stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VolunteerStory {
    pub id: Uuid,
    pub volunteer_id: Option<Uuid>,
    pub title: String,
    /// Lowercase kebab-case slug, unique across stories.
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Data for creating a new story.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = volunteer_stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVolunteerStory {
    pub volunteer_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
}

/// Data for updating a story.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = volunteer_stories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateVolunteerStory {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
}

impl UpdateVolunteerStory {
    /// Returns whether the changeset would not modify any column.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.image_url.is_none()
            && self.featured.is_none()
    }
}

//! Volunteer story response types.

use jiff::Timestamp;
use paws_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Story response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: Uuid,
    /// Author, `null` for stories published by the platform.
    pub volunteer_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Story {
    pub fn from_model(story: model::VolunteerStory) -> Self {
        Self {
            id: story.id,
            volunteer_id: story.volunteer_id,
            title: story.title,
            slug: story.slug,
            excerpt: story.excerpt,
            content: story.content,
            image_url: story.image_url,
            featured: story.featured,
            created_at: story.created_at.into(),
            updated_at: story.updated_at.into(),
        }
    }

    pub fn from_models(stories: Vec<model::VolunteerStory>) -> Stories {
        stories.into_iter().map(Self::from_model).collect()
    }
}

/// Response for listing stories.
pub type Stories = Vec<Story>;

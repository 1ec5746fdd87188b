//! Volunteer story request types.

use paws_postgres::model::{NewVolunteerStory, UpdateVolunteerStory};
use paws_postgres::types::MAX_LIMIT;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validations::{OptionNormalized, validate_not_blank, validate_slug};

/// Request payload for publishing a story.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStory {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: String,
    /// Unique lowercase kebab-case identifier used in URLs.
    #[validate(length(min = 1, max = 200), custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1, max = 50000), custom(function = "validate_not_blank"))]
    pub content: String,
    #[validate(url, length(max = 2048))]
    pub image_url: Option<String>,
    /// Whether the story is highlighted on the landing page.
    pub featured: Option<bool>,
}

impl CreateStory {
    /// Converts this request into a [`NewVolunteerStory`] authored by
    /// `volunteer_id`, or an unowned story when `None`.
    pub fn into_model(self, volunteer_id: Option<Uuid>) -> NewVolunteerStory {
        NewVolunteerStory {
            volunteer_id,
            title: self.title.trim().to_owned(),
            slug: self.slug,
            excerpt: self.excerpt.normalized_option(),
            content: self.content,
            image_url: self.image_url.normalized_option(),
            featured: self.featured,
        }
    }
}

/// Request payload for editing a story. The story id travels in the body.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStory {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 200), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[validate(length(min = 1, max = 50000), custom(function = "validate_not_blank"))]
    pub content: Option<String>,
    #[validate(url, length(max = 2048))]
    pub image_url: Option<String>,
    pub featured: Option<bool>,
}

impl UpdateStory {
    pub fn into_model(self) -> UpdateVolunteerStory {
        UpdateVolunteerStory {
            title: self.title.map(|title| title.trim().to_owned()),
            slug: self.slug,
            excerpt: self.excerpt,
            content: self.content,
            image_url: self.image_url,
            featured: self.featured,
        }
    }
}

/// Query parameters of `GET /api/volunteer-stories`.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct ListStoriesQuery {
    /// Only featured stories.
    pub featured: Option<bool>,
    /// Look up a single story by slug; the response is still a list.
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    #[validate(range(min = 1, max = MAX_LIMIT))]
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn slug_format_is_validated() -> anyhow::Result<()> {
        let request: CreateStory = serde_json::from_value(json!({
            "title": "First rescue",
            "slug": "First Rescue",
            "content": "It was raining.",
        }))?;
        assert!(request.validate().is_err());

        let request: UpdateStory = serde_json::from_value(json!({ "slug": "first-rescue" }))?;
        assert!(request.validate().is_ok());
        Ok(())
    }

    #[test]
    fn author_comes_from_the_caller() -> anyhow::Result<()> {
        let author = Uuid::new_v4();
        let request: CreateStory = serde_json::from_value(json!({
            "title": "First rescue",
            "slug": "first-rescue",
            "content": "It was raining.",
            "volunteerId": Uuid::new_v4(),
        }))?;

        assert_eq!(request.into_model(Some(author)).volunteer_id, Some(author));
        Ok(())
    }
}

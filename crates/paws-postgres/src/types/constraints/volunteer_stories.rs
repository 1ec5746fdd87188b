//! Volunteer stories table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Volunteer story table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum VolunteerStoryConstraints {
    #[strum(serialize = "volunteer_stories_slug_format")]
    SlugFormat,

    #[strum(serialize = "volunteer_stories_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "volunteer_stories_slug_unique_idx")]
    SlugUnique,
}

impl VolunteerStoryConstraints {
    /// Creates a new [`VolunteerStoryConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            VolunteerStoryConstraints::SlugFormat => ConstraintCategory::Validation,
            VolunteerStoryConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
            VolunteerStoryConstraints::SlugUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<VolunteerStoryConstraints> for String {
    #[inline]
    fn from(val: VolunteerStoryConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for VolunteerStoryConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

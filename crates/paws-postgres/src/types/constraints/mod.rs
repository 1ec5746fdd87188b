//! Database constraint violations organized by table.
//!
//! Each table gets its own strongly typed enum of check constraints and
//! unique indexes, so callers can turn a raw constraint name reported by
//! PostgreSQL into something they can match on.

mod animals;
mod content_blocks;
mod media;
mod organizations;
mod users;
mod volunteer_registrations;
mod volunteer_stories;

use std::fmt;

pub use animals::AnimalConstraints;
pub use content_blocks::ContentBlockConstraints;
pub use media::MediaConstraints;
pub use organizations::OrganizationConstraints;
use serde::{Deserialize, Serialize};
pub use users::UserConstraints;
pub use volunteer_registrations::VolunteerRegistrationConstraints;
pub use volunteer_stories::VolunteerStoryConstraints;

/// Unified constraint violation enum that can represent any known constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Organization(OrganizationConstraints),
    User(UserConstraints),
    VolunteerRegistration(VolunteerRegistrationConstraints),

    Animal(AnimalConstraints),
    VolunteerStory(VolunteerStoryConstraints),

    ContentBlock(ContentBlockConstraints),
    Media(MediaConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Business logic constraints (domain-specific rules).
    BusinessLogic,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// Returns `None` if the constraint name is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use paws_postgres::types::ConstraintViolation;
    ///
    /// let violation = ConstraintViolation::new("volunteer_stories_slug_unique_idx");
    /// assert!(violation.is_some());
    ///
    /// let unknown = ConstraintViolation::new("unknown_constraint");
    /// assert!(unknown.is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        // Longer prefixes first: "volunteer_registrations_" and
        // "volunteer_stories_" never collide with "users_".
        if constraint.starts_with("organizations_") {
            OrganizationConstraints::new(constraint).map(Self::Organization)
        } else if constraint.starts_with("users_") {
            UserConstraints::new(constraint).map(Self::User)
        } else if constraint.starts_with("volunteer_registrations_") {
            VolunteerRegistrationConstraints::new(constraint).map(Self::VolunteerRegistration)
        } else if constraint.starts_with("volunteer_stories_") {
            VolunteerStoryConstraints::new(constraint).map(Self::VolunteerStory)
        } else if constraint.starts_with("animals_") {
            AnimalConstraints::new(constraint).map(Self::Animal)
        } else if constraint.starts_with("content_blocks_") {
            ContentBlockConstraints::new(constraint).map(Self::ContentBlock)
        } else if constraint.starts_with("media_") {
            MediaConstraints::new(constraint).map(Self::Media)
        } else {
            None
        }
    }

    /// Returns the table the violated constraint belongs to.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Organization(_) => "organizations",
            ConstraintViolation::User(_) => "users",
            ConstraintViolation::VolunteerRegistration(_) => "volunteer_registrations",
            ConstraintViolation::Animal(_) => "animals",
            ConstraintViolation::VolunteerStory(_) => "volunteer_stories",
            ConstraintViolation::ContentBlock(_) => "content_blocks",
            ConstraintViolation::Media(_) => "media",
        }
    }

    /// Returns the category of the violated constraint.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Organization(c) => c.categorize(),
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::VolunteerRegistration(c) => c.categorize(),
            ConstraintViolation::Animal(c) => c.categorize(),
            ConstraintViolation::VolunteerStory(c) => c.categorize(),
            ConstraintViolation::ContentBlock(c) => c.categorize(),
            ConstraintViolation::Media(c) => c.categorize(),
        }
    }

    #[inline]
    pub fn constraint_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Organization(c) => write!(f, "{}", c),
            ConstraintViolation::User(c) => write!(f, "{}", c),
            ConstraintViolation::VolunteerRegistration(c) => write!(f, "{}", c),
            ConstraintViolation::Animal(c) => write!(f, "{}", c),
            ConstraintViolation::VolunteerStory(c) => write!(f, "{}", c),
            ConstraintViolation::ContentBlock(c) => write!(f, "{}", c),
            ConstraintViolation::Media(c) => write!(f, "{}", c),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_parsing() {
        assert_eq!(
            ConstraintViolation::new("users_email_unique_idx"),
            Some(ConstraintViolation::User(UserConstraints::EmailUnique))
        );

        assert_eq!(
            ConstraintViolation::new("volunteer_stories_slug_unique_idx"),
            Some(ConstraintViolation::VolunteerStory(
                VolunteerStoryConstraints::SlugUnique
            ))
        );

        assert_eq!(
            ConstraintViolation::new("volunteer_registrations_pending_email_unique_idx"),
            Some(ConstraintViolation::VolunteerRegistration(
                VolunteerRegistrationConstraints::PendingEmailUnique
            ))
        );

        assert_eq!(ConstraintViolation::new("users_unknown_idx"), None);
        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
    }

    #[test]
    fn test_table_name_extraction() {
        let violation =
            ConstraintViolation::Organization(OrganizationConstraints::RegistrationNumberUnique);
        assert_eq!(violation.table_name(), "organizations");

        let violation = ConstraintViolation::Media(MediaConstraints::FileKeyUnique);
        assert_eq!(violation.table_name(), "media");
    }

    #[test]
    fn test_constraint_categorization() {
        let violation = ConstraintViolation::Animal(AnimalConstraints::NameNotEmpty);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Validation
        );

        let violation = ConstraintViolation::User(UserConstraints::EmailUnique);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::Uniqueness
        );

        let violation =
            ConstraintViolation::User(UserConstraints::OrganizationAccountHasOrganization);
        assert_eq!(
            violation.constraint_category(),
            ConstraintCategory::BusinessLogic
        );
    }

    #[test]
    fn test_serde_uses_constraint_name() {
        let violation = ConstraintViolation::VolunteerStory(VolunteerStoryConstraints::SlugFormat);
        let json = serde_json::to_string(&violation).unwrap();
        assert_eq!(json, "\"volunteer_stories_slug_format\"");

        let parsed: ConstraintViolation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, violation);
    }
}

//! User model for PostgreSQL database operations.
//!
//! Users are the accounts that can sign in: volunteers, organization
//! accounts and administrators. A verified volunteer user only exists once
//! a pending registration has been approved.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::users;
use crate::types::UserRole;

/// Account that can authenticate against the platform.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Canonical account role.
    pub role: UserRole,
    /// Login email, unique case-insensitively.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// URL of the profile picture.
    pub image: Option<String>,
    /// Free-form biography.
    pub about: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Whether the profile is visible to everyone.
    pub public_profile: bool,
    /// Whether the account passed review.
    pub verified: bool,
    /// Organization the account belongs to or administers.
    pub organization_id: Option<Uuid>,
    /// Timestamp when the user was created.
    pub created_at: Timestamp,
    /// Timestamp when the user was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new user.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    pub role: UserRole,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub about: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub public_profile: Option<bool>,
    pub verified: bool,
    pub organization_id: Option<Uuid>,
}

/// Profile fields a user may change on their own account.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub about: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub public_profile: Option<bool>,
}

impl User {
    /// Returns the display name built from first and last name.
    ///
    /// Returns `None` when both parts are missing or blank.
    pub fn display_name(&self) -> Option<String> {
        let first = self.first_name.as_deref().unwrap_or_default().trim();
        let last = self.last_name.as_deref().unwrap_or_default().trim();
        let name = format!("{first} {last}");
        let name = name.trim();

        (!name.is_empty()).then(|| name.to_owned())
    }

    /// Returns whether the user has administrative privileges.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl UpdateUser {
    /// Returns whether the changeset would not modify any column.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.image.is_none()
            && self.about.is_none()
            && self.phone.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.public_profile.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        let now = Timestamp::from(jiff::Timestamp::UNIX_EPOCH);
        User {
            id: Uuid::nil(),
            role: UserRole::Volunteer,
            email: "jane@example.com".into(),
            password_hash: "hash".into(),
            first_name: first.map(Into::into),
            last_name: last.map(Into::into),
            image: None,
            about: None,
            phone: None,
            city: None,
            state: None,
            public_profile: true,
            verified: true,
            organization_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn display_name_joins_parts() {
        assert_eq!(
            user(Some("Jane"), Some("Doe")).display_name().as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(user(Some("Jane"), None).display_name().as_deref(), Some("Jane"));
        assert_eq!(user(None, Some(" Doe ")).display_name().as_deref(), Some("Doe"));
    }

    #[test]
    fn display_name_missing_when_blank() {
        assert_eq!(user(None, None).display_name(), None);
        assert_eq!(user(Some("  "), Some("")).display_name(), None);
    }
}

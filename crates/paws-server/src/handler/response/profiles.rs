//! User profile response types.
//!
//! Owners and administrators get the [`FullProfile`]. Everyone else gets the
//! [`PublicProfile`], which never carries the email address, phone number
//! or the separate name parts.

use jiff::Timestamp;
use paws_postgres::model;
use paws_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::Identity;

/// Name shown for profiles without a public name.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Organization a profile is affiliated with.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    pub id: Uuid,
    pub name: String,
}

impl OrganizationSummary {
    pub fn from_model(organization: &model::Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name.clone(),
        }
    }
}

/// Every profile field, for the owner and administrators.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProfile {
    pub id: Uuid,
    pub role: UserRole,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Display name, `"Anonymous"` when no name is set.
    pub name: String,
    pub image: Option<String>,
    pub about: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub public_profile: bool,
    pub verified: bool,
    pub organization: Option<OrganizationSummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields anyone may see.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    /// Display name; `"Anonymous"` for private profiles.
    pub name: String,
    /// Avatar URL; `null` for private profiles.
    pub image: Option<String>,
    pub about: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub organization: Option<OrganizationSummary>,
}

/// Profile shaped for the viewer.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Profile {
    Full(FullProfile),
    Public(PublicProfile),
}

impl Profile {
    /// Shapes `user` for `viewer`.
    ///
    /// Only the profile owner and administrators see the full profile.
    pub fn for_viewer(
        user: model::User,
        organization: Option<OrganizationSummary>,
        viewer: Option<&Identity>,
    ) -> Self {
        let is_privileged =
            viewer.is_some_and(|viewer| viewer.is_admin() || viewer.is_user(user.id));

        if is_privileged {
            Self::Full(FullProfile::from_model(user, organization))
        } else {
            Self::Public(PublicProfile::from_model(user, organization))
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

impl FullProfile {
    pub fn from_model(user: model::User, organization: Option<OrganizationSummary>) -> Self {
        let name = user
            .display_name()
            .unwrap_or_else(|| ANONYMOUS_NAME.to_owned());

        Self {
            id: user.id,
            role: user.role,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            name,
            image: user.image,
            about: user.about,
            phone: user.phone,
            city: user.city,
            state: user.state,
            public_profile: user.public_profile,
            verified: user.verified,
            organization,
            created_at: user.created_at.into(),
            updated_at: user.updated_at.into(),
        }
    }
}

impl PublicProfile {
    /// Private profiles keep their about text and location but lose the
    /// name and avatar.
    pub fn from_model(user: model::User, organization: Option<OrganizationSummary>) -> Self {
        let (name, image) = if user.public_profile {
            let name = user
                .display_name()
                .unwrap_or_else(|| ANONYMOUS_NAME.to_owned());
            (name, user.image)
        } else {
            (ANONYMOUS_NAME.to_owned(), None)
        };

        Self {
            id: user.id,
            name,
            image,
            about: user.about,
            city: user.city,
            state: user.state,
            organization,
        }
    }
}

/// Response for listing volunteers.
pub type Profiles = Vec<Profile>;

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn user(public_profile: bool) -> model::User {
        let now = jiff_diesel::Timestamp::from(Timestamp::UNIX_EPOCH);
        model::User {
            id: Uuid::new_v4(),
            role: UserRole::Volunteer,
            email: "jane@example.com".into(),
            password_hash: "$argon2id$hash".into(),
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            image: Some("https://cdn.example.com/jane.png".into()),
            about: Some("Walks dogs on weekends".into()),
            phone: Some("+1 555 0100".into()),
            city: Some("Portland".into()),
            state: Some("OR".into()),
            public_profile,
            verified: true,
            organization_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn viewer(user_id: Uuid, role: UserRole) -> Identity {
        Identity::new(user_id, role, true, None).expect("identity")
    }

    fn to_json(profile: &Profile) -> Value {
        serde_json::to_value(profile).expect("serializable profile")
    }

    #[test]
    fn private_profile_is_redacted_for_strangers() {
        let user = user(false);
        let stranger = viewer(Uuid::new_v4(), UserRole::Volunteer);

        let json = to_json(&Profile::for_viewer(user, None, Some(&stranger)));
        assert_eq!(json["name"], ANONYMOUS_NAME);
        assert!(json["image"].is_null());
        assert_eq!(json["about"], "Walks dogs on weekends");
        for hidden in ["email", "firstName", "lastName", "phone", "passwordHash"] {
            assert!(json.get(hidden).is_none(), "{hidden} leaked");
        }
    }

    #[test]
    fn anonymous_viewers_get_the_public_profile() {
        let json = to_json(&Profile::for_viewer(user(true), None, None));
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["image"], "https://cdn.example.com/jane.png");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn owner_and_admin_see_everything() {
        let user = user(false);
        let owner = viewer(user.id, UserRole::Volunteer);
        let admin = viewer(Uuid::new_v4(), UserRole::Admin);

        for identity in [owner, admin] {
            let profile = Profile::for_viewer(user.clone(), None, Some(&identity));
            assert!(profile.is_full());
            let json = to_json(&profile);
            assert_eq!(json["email"], "jane@example.com");
            assert_eq!(json["firstName"], "Jane");
            assert!(json.get("passwordHash").is_none());
        }
    }

    #[test]
    fn nameless_profile_falls_back_to_anonymous() {
        let mut user = user(true);
        user.first_name = None;
        user.last_name = Some("  ".into());

        let json = to_json(&Profile::for_viewer(user, None, None));
        assert_eq!(json["name"], ANONYMOUS_NAME);
    }
}

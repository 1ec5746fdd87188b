//! User profile request types.

use paws_postgres::model::UpdateUser;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::validate_phone_format;

/// Request payload for updating a user profile.
///
/// Email, role, verification and organization affiliation are not part of
/// the profile and cannot be changed here.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    /// Avatar URL.
    #[validate(url, length(max = 2048))]
    pub image: Option<String>,
    #[validate(length(max = 2000))]
    pub about: Option<String>,
    #[validate(custom(function = "validate_phone_format"))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    /// Whether non-members may see the full profile.
    pub public_profile: Option<bool>,
}

impl UpdateProfile {
    pub fn into_model(self) -> UpdateUser {
        UpdateUser {
            first_name: self.first_name,
            last_name: self.last_name,
            image: self.image,
            about: self.about,
            phone: self.phone,
            city: self.city,
            state: self.state,
            public_profile: self.public_profile,
        }
    }
}

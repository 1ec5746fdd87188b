//! Organization request types.

use paws_postgres::model::{NewOrganization, UpdateOrganization as UpdateOrganizationModel};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::{
    Normalized, OptionNormalized, deserialize_email, deserialize_optional_email, normalize_email,
    validate_not_blank, validate_phone_format,
};

/// Request payload for registering an organization together with the
/// account that administers it.
///
/// Both start unverified until an administrator reviews them.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganization {
    /// Public name of the organization (2-200 characters).
    #[validate(length(min = 2, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,
    /// Official registration number, unique across organizations.
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub registration_number: String,
    /// Contact email, also used to sign in.
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email, length(min = 5, max = 254))]
    pub email: String,
    /// Password of the organization account (8-128 characters).
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(custom(function = "validate_phone_format"))]
    pub phone: Option<String>,
    #[validate(url, length(max = 2048))]
    pub website: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(url, length(max = 2048))]
    pub logo_url: Option<String>,
}

impl RegisterOrganization {
    /// Returns the normalized sign-in email.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Converts this request into a [`NewOrganization`].
    ///
    /// The password is not part of the organization row; hash it
    /// separately for the account.
    pub fn into_model(self) -> NewOrganization {
        NewOrganization {
            email: normalize_email(&self.email),
            name: self.name.normalized_string(),
            registration_number: self.registration_number.normalized_string(),
            phone: self.phone.normalized_option(),
            website: self.website.normalized_option(),
            description: self.description,
            address: self.address.normalized_option(),
            city: self.city.normalized_option(),
            state: self.state.normalized_option(),
            logo_url: self.logo_url.normalized_option(),
        }
    }
}

/// Request payload for updating an organization profile.
///
/// `id`, `registrationNumber` and `verified` are protected and never read
/// from the body.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganization {
    #[validate(length(min = 2, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_email")]
    #[validate(email, length(min = 5, max = 254))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone_format"))]
    pub phone: Option<String>,
    #[validate(url, length(max = 2048))]
    pub website: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(url, length(max = 2048))]
    pub logo_url: Option<String>,
}

impl UpdateOrganization {
    pub fn into_model(self) -> UpdateOrganizationModel {
        UpdateOrganizationModel {
            name: self.name.map(|name| name.normalized_string()),
            email: self.email.as_deref().map(normalize_email),
            phone: self.phone,
            website: self.website,
            description: self.description,
            address: self.address,
            city: self.city,
            state: self.state,
            logo_url: self.logo_url,
            verified: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn registration_is_normalized() -> anyhow::Result<()> {
        let request: RegisterOrganization = serde_json::from_value(json!({
            "name": " Happy Paws ",
            "registrationNumber": " RN-42 ",
            "email": "Contact@HappyPaws.org",
            "password": "correct horse battery",
        }))?;

        assert!(request.validate().is_ok());
        let model = request.into_model();
        assert_eq!(model.name, "Happy Paws");
        assert_eq!(model.registration_number, "RN-42");
        assert_eq!(model.email, "contact@happypaws.org");
        Ok(())
    }

    #[test]
    fn short_password_is_rejected() -> anyhow::Result<()> {
        let request: RegisterOrganization = serde_json::from_value(json!({
            "name": "Happy Paws",
            "registrationNumber": "RN-42",
            "email": "contact@happypaws.org",
            "password": "short",
        }))?;

        assert!(request.validate().is_err());
        Ok(())
    }

    #[test]
    fn update_never_sets_verified() -> anyhow::Result<()> {
        let request: UpdateOrganization = serde_json::from_value(json!({
            "name": "Happier Paws",
            "verified": true,
        }))?;

        let model = request.into_model();
        assert_eq!(model.verified, None);
        assert_eq!(model.name.as_deref(), Some("Happier Paws"));
        Ok(())
    }
}

//! Volunteer registration request types.

use paws_postgres::model::NewVolunteerRegistration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validations::{
    Normalized, OptionNormalized, deserialize_email, normalize_email, validate_not_blank,
    validate_phone_format,
};

/// Request payload for applying to volunteer with an organization.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistration {
    /// Organization the applicant wants to join.
    pub organization_id: Uuid,
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email, length(min = 5, max = 254))]
    pub email: String,
    /// Password of the future account (8-128 characters).
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "validate_phone_format"))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    /// Why the applicant wants to volunteer.
    #[validate(length(max = 2000))]
    pub motivation: Option<String>,
}

impl CreateRegistration {
    /// Returns the normalized email of the applicant.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }

    /// Converts this request into a [`NewVolunteerRegistration`] storing
    /// `password_hash` instead of the password.
    pub fn into_model(self, password_hash: String) -> NewVolunteerRegistration {
        NewVolunteerRegistration {
            organization_id: self.organization_id,
            email: normalize_email(&self.email),
            password_hash,
            first_name: self.first_name.normalized_string(),
            last_name: self.last_name.normalized_string(),
            phone: self.phone.normalized_option(),
            city: self.city.normalized_option(),
            state: self.state.normalized_option(),
            motivation: self.motivation,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn password_is_replaced_by_hash() -> anyhow::Result<()> {
        let request: CreateRegistration = serde_json::from_value(json!({
            "organizationId": Uuid::new_v4(),
            "email": " Volunteer@Example.com",
            "password": "long enough password",
            "firstName": "Jane",
            "lastName": "Doe",
        }))?;

        assert!(request.validate().is_ok());
        let model = request.into_model("$argon2id$hash".into());
        assert_eq!(model.password_hash, "$argon2id$hash");
        assert_eq!(model.email, "volunteer@example.com");
        Ok(())
    }

    #[test]
    fn padded_email_is_normalized_before_validation() -> anyhow::Result<()> {
        let request: CreateRegistration = serde_json::from_value(json!({
            "organizationId": Uuid::new_v4(),
            "email": "  Jane.Doe@Example.org \n",
            "password": "long enough password",
            "firstName": "Jane",
            "lastName": "Doe",
        }))?;

        assert_eq!(request.email, "jane.doe@example.org");
        assert!(request.validate().is_ok());
        Ok(())
    }

    #[test]
    fn organization_is_required() {
        let result = serde_json::from_value::<CreateRegistration>(json!({
            "email": "volunteer@example.com",
            "password": "long enough password",
            "firstName": "Jane",
            "lastName": "Doe",
        }));
        assert!(result.is_err());
    }
}

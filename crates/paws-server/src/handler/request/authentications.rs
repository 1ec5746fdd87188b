//! Authentication request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::deserialize_email;

/// Request payload for login.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Email address of the account.
    #[serde(deserialize_with = "deserialize_email")]
    #[validate(email, length(min = 5, max = 254))]
    pub email: String,

    /// Password of the account.
    #[validate(length(min = 1, max = 1000))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn login_email_is_trimmed_and_lowercased() -> anyhow::Result<()> {
        let login: Login = serde_json::from_value(json!({
            "email": " Shelter@HappyTails.test ",
            "password": "correct horse battery",
        }))?;

        assert_eq!(login.email, "shelter@happytails.test");
        assert!(login.validate().is_ok());
        Ok(())
    }

    #[test]
    fn malformed_email_still_fails_validation() -> anyhow::Result<()> {
        let login: Login = serde_json::from_value(json!({
            "email": "  not-an-email ",
            "password": "correct horse battery",
        }))?;

        assert!(login.validate().is_err());
        Ok(())
    }
}

//! Request validation utilities.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

/// Lowercase kebab-case: `first-rescue`, `tom-2024`.
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern compiles"));

pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if !SLUG_PATTERN.is_match(slug) {
        return Err(validation_error(
            "slug_format",
            "may only contain lowercase letters, digits and single hyphens",
        ));
    }

    Ok(())
}

pub fn validate_phone_format(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = |c: char| c.is_ascii_digit() || " +-().".contains(c);

    if digits < 7 || !phone.chars().all(allowed) {
        return Err(validation_error(
            "phone_format",
            "must be a phone number with at least 7 digits",
        ));
    }

    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("blank", "cannot be blank"));
    }

    Ok(())
}

/// Trait for normalizing required request data.
pub trait Normalized {
    /// Trims surrounding whitespace.
    fn normalized_string(&self) -> String;
}

/// Trait for normalizing optional request data.
pub trait OptionNormalized {
    /// Trims surrounding whitespace and drops empty values.
    fn normalized_option(&self) -> Option<String>;
}

impl Normalized for String {
    fn normalized_string(&self) -> String {
        self.trim().to_owned()
    }
}

impl OptionNormalized for Option<String> {
    fn normalized_option(&self) -> Option<String> {
        self.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

/// Email addresses are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes an email while deserializing, so validation sees the stored
/// form and surrounding whitespace is not rejected.
pub fn deserialize_email<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let email = String::deserialize(deserializer)?;
    Ok(normalize_email(&email))
}

/// [`deserialize_email`] for optional fields; pair it with `#[serde(default)]`.
pub fn deserialize_optional_email<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let email = Option::<String>::deserialize(deserializer)?;
    Ok(email.as_deref().map(normalize_email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_are_kebab_case() {
        assert!(validate_slug("first-rescue").is_ok());
        assert!(validate_slug("tom-2024").is_ok());
        assert!(validate_slug("a").is_ok());

        assert!(validate_slug("First-Rescue").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn phone_numbers_need_digits() {
        assert!(validate_phone_format("+1 (555) 010-9999").is_ok());
        assert!(validate_phone_format("12345").is_err());
        assert!(validate_phone_format("call me maybe").is_err());
    }

    #[test]
    fn optional_strings_are_trimmed() {
        assert_eq!(Some("  Lviv ".to_owned()).normalized_option().as_deref(), Some("Lviv"));
        assert_eq!(Some("   ".to_owned()).normalized_option(), None);
        assert_eq!(None::<String>.normalized_option(), None);
        assert_eq!(normalize_email(" Jane@Example.COM "), "jane@example.com");
    }
}

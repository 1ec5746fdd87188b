//! Account role enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Canonical role of a user account.
///
/// Corresponds to the `USER_ROLE` PostgreSQL enum. Session and request
/// payloads may spell roles in any case, so parsing is case-insensitive and
/// every comparison happens on this enum rather than on raw strings.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
#[strum(ascii_case_insensitive)]
pub enum UserRole {
    /// Individual volunteer, optionally affiliated with one organization.
    #[db_rename = "VOLUNTEER"]
    #[serde(rename = "VOLUNTEER")]
    #[strum(serialize = "VOLUNTEER")]
    #[default]
    Volunteer,

    /// Account acting on behalf of a registered organization.
    #[db_rename = "ORGANIZATION"]
    #[serde(rename = "ORGANIZATION")]
    #[strum(serialize = "ORGANIZATION")]
    Organization,

    /// Platform administrator.
    #[db_rename = "ADMIN"]
    #[serde(rename = "ADMIN")]
    #[strum(serialize = "ADMIN")]
    Admin,
}

impl UserRole {
    /// Parses a role string in any letter case.
    ///
    /// Surrounding whitespace is ignored. Returns `None` for unknown roles.
    pub fn parse_lenient(role: &str) -> Option<Self> {
        role.trim().parse().ok()
    }

    /// Returns whether this role has platform-wide privileges.
    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_roles_in_any_case() {
        assert_eq!(
            UserRole::parse_lenient("organization"),
            Some(UserRole::Organization)
        );
        assert_eq!(
            UserRole::parse_lenient("ORGANIZATION"),
            Some(UserRole::Organization)
        );
        assert_eq!(
            UserRole::parse_lenient(" Volunteer "),
            Some(UserRole::Volunteer)
        );
        assert_eq!(UserRole::parse_lenient("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse_lenient("adopter"), None);
        assert_eq!(UserRole::parse_lenient(""), None);
    }

    #[test]
    fn displays_canonical_spelling() {
        assert_eq!(UserRole::Organization.to_string(), "ORGANIZATION");
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"ADMIN\""
        );
    }
}

//! Organizations table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Organization table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum OrganizationConstraints {
    #[strum(serialize = "organizations_name_not_empty")]
    NameNotEmpty,

    #[strum(serialize = "organizations_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "organizations_registration_number_unique_idx")]
    RegistrationNumberUnique,
    #[strum(serialize = "organizations_email_unique_idx")]
    EmailUnique,
}

impl OrganizationConstraints {
    /// Creates a new [`OrganizationConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            OrganizationConstraints::NameNotEmpty => ConstraintCategory::Validation,
            OrganizationConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
            OrganizationConstraints::RegistrationNumberUnique
            | OrganizationConstraints::EmailUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<OrganizationConstraints> for String {
    #[inline]
    fn from(val: OrganizationConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for OrganizationConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

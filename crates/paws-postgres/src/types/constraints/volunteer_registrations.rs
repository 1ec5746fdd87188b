//! Volunteer registrations table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Volunteer registration table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum VolunteerRegistrationConstraints {
    #[strum(serialize = "volunteer_registrations_updated_after_created")]
    UpdatedAfterCreated,

    #[strum(serialize = "volunteer_registrations_verified_has_user")]
    VerifiedHasUser,

    #[strum(serialize = "volunteer_registrations_pending_email_unique_idx")]
    PendingEmailUnique,
}

impl VolunteerRegistrationConstraints {
    /// Creates a new [`VolunteerRegistrationConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            VolunteerRegistrationConstraints::UpdatedAfterCreated => {
                ConstraintCategory::Chronological
            }
            VolunteerRegistrationConstraints::VerifiedHasUser => ConstraintCategory::BusinessLogic,
            VolunteerRegistrationConstraints::PendingEmailUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<VolunteerRegistrationConstraints> for String {
    #[inline]
    fn from(val: VolunteerRegistrationConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for VolunteerRegistrationConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

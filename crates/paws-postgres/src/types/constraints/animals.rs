//! Animals table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Animal table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum AnimalConstraints {
    #[strum(serialize = "animals_name_not_empty")]
    NameNotEmpty,

    #[strum(serialize = "animals_updated_after_created")]
    UpdatedAfterCreated,
}

impl AnimalConstraints {
    /// Creates a new [`AnimalConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            AnimalConstraints::NameNotEmpty => ConstraintCategory::Validation,
            AnimalConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }
}

impl From<AnimalConstraints> for String {
    #[inline]
    fn from(val: AnimalConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for AnimalConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

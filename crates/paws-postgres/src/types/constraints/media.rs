//! Media table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Media table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum MediaConstraints {
    #[strum(serialize = "media_size_bytes_non_negative")]
    SizeBytesNonNegative,

    #[strum(serialize = "media_deleted_after_created")]
    DeletedAfterCreated,

    #[strum(serialize = "media_file_key_unique_idx")]
    FileKeyUnique,
}

impl MediaConstraints {
    /// Creates a new [`MediaConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            MediaConstraints::SizeBytesNonNegative => ConstraintCategory::Validation,
            MediaConstraints::DeletedAfterCreated => ConstraintCategory::Chronological,
            MediaConstraints::FileKeyUnique => ConstraintCategory::Uniqueness,
        }
    }
}

impl From<MediaConstraints> for String {
    #[inline]
    fn from(val: MediaConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for MediaConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//! Content blocks table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Content block table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ContentBlockConstraints {
    #[strum(serialize = "content_blocks_block_type_not_empty")]
    BlockTypeNotEmpty,

    #[strum(serialize = "content_blocks_updated_after_created")]
    UpdatedAfterCreated,
}

impl ContentBlockConstraints {
    /// Creates a new [`ContentBlockConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ContentBlockConstraints::BlockTypeNotEmpty => ConstraintCategory::Validation,
            ContentBlockConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }
}

impl From<ContentBlockConstraints> for String {
    #[inline]
    fn from(val: ContentBlockConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ContentBlockConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

//! Animal listing status enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Listing status of an animal.
///
/// Corresponds to the `ANIMAL_STATUS` PostgreSQL enum. Unknown values coming
/// from clients are coerced to [`AnimalStatus::Other`] instead of being
/// rejected, both by [`AnimalStatus::coerce`] and by deserialization.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::AnimalStatus"]
#[strum(ascii_case_insensitive)]
pub enum AnimalStatus {
    /// Available for adoption.
    #[db_rename = "ADOPTION"]
    #[serde(rename = "ADOPTION")]
    #[strum(serialize = "ADOPTION")]
    Adoption,

    /// Looking for a foster home.
    #[db_rename = "FOSTER"]
    #[serde(rename = "FOSTER")]
    #[strum(serialize = "FOSTER")]
    Foster,

    /// Living on the street, reported for help.
    #[db_rename = "STREET"]
    #[serde(rename = "STREET")]
    #[strum(serialize = "STREET")]
    Street,

    /// Anything else, including unrecognized input.
    #[db_rename = "OTHER"]
    #[serde(rename = "OTHER")]
    #[strum(serialize = "OTHER")]
    #[default]
    Other,
}

impl AnimalStatus {
    /// Parses a status string, falling back to [`AnimalStatus::Other`].
    pub fn coerce(status: &str) -> Self {
        status.trim().parse().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for AnimalStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let status = String::deserialize(deserializer)?;
        Ok(Self::coerce(&status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_unknown_status_to_other() {
        assert_eq!(AnimalStatus::coerce("INVALID"), AnimalStatus::Other);
        assert_eq!(AnimalStatus::coerce(""), AnimalStatus::Other);
        assert_eq!(AnimalStatus::coerce("adoption"), AnimalStatus::Adoption);
        assert_eq!(AnimalStatus::coerce("Foster"), AnimalStatus::Foster);
    }

    #[test]
    fn deserializes_leniently() {
        let status: AnimalStatus = serde_json::from_str("\"INVALID\"").unwrap();
        assert_eq!(status, AnimalStatus::Other);

        let status: AnimalStatus = serde_json::from_str("\"street\"").unwrap();
        assert_eq!(status, AnimalStatus::Street);

        assert!(serde_json::from_str::<AnimalStatus>("42").is_err());
    }

    #[test]
    fn serializes_canonical_spelling() {
        assert_eq!(
            serde_json::to_string(&AnimalStatus::Adoption).unwrap(),
            "\"ADOPTION\""
        );
    }
}

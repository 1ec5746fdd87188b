//! Animal request types.

use paws_postgres::model::{NewAnimal, UpdateAnimal as UpdateAnimalModel};
use paws_postgres::query::AnimalFilter;
use paws_postgres::types::{AnimalStatus, MAX_LIMIT, Pagination};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::validations::{OptionNormalized, validate_not_blank};

/// Request payload for listing an animal.
///
/// Unknown `status` values are accepted and stored as `OTHER`.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnimal {
    /// Name of the animal (1-100 characters).
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    /// Species, e.g. `dog` or `cat` (1-50 characters).
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub species: String,
    #[validate(length(max = 100))]
    pub breed: Option<String>,
    #[validate(length(max = 50))]
    pub age: Option<String>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    /// Listing status, defaults to `OTHER`.
    pub status: Option<AnimalStatus>,
    #[validate(url, length(max = 2048))]
    pub image_url: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
}

impl CreateAnimal {
    /// Converts this request into a [`NewAnimal`] created by `created_by_id`.
    ///
    /// The creator always comes from the session, never from the body.
    pub fn into_model(self, created_by_id: Uuid) -> NewAnimal {
        NewAnimal {
            created_by_id,
            name: self.name.trim().to_owned(),
            species: self.species.trim().to_owned(),
            breed: self.breed.normalized_option(),
            age: self.age.normalized_option(),
            gender: self.gender.normalized_option(),
            description: self.description,
            status: self.status.unwrap_or_default(),
            image_url: self.image_url.normalized_option(),
            city: self.city.normalized_option(),
            state: self.state.normalized_option(),
        }
    }
}

/// Request payload for updating an animal.
///
/// All fields are optional; only provided fields are updated.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnimal {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub species: Option<String>,
    #[validate(length(max = 100))]
    pub breed: Option<String>,
    #[validate(length(max = 50))]
    pub age: Option<String>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub status: Option<AnimalStatus>,
    #[validate(url, length(max = 2048))]
    pub image_url: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
}

impl UpdateAnimal {
    pub fn into_model(self) -> UpdateAnimalModel {
        UpdateAnimalModel {
            name: self.name.map(|name| name.trim().to_owned()),
            species: self.species.map(|species| species.trim().to_owned()),
            breed: self.breed,
            age: self.age,
            gender: self.gender,
            description: self.description,
            status: self.status,
            image_url: self.image_url,
            city: self.city,
            state: self.state,
        }
    }
}

/// Query parameters of `GET /api/animals`.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct ListAnimalsQuery {
    /// Free-text search over name, breed and description.
    #[validate(length(max = 100))]
    pub query: Option<String>,
    #[validate(length(max = 50))]
    pub species: Option<String>,
    pub status: Option<AnimalStatus>,
    /// Animal to leave out of the results.
    pub exclude: Option<Uuid>,
    /// Maximum number of animals to return (1-100, defaults to 50).
    #[validate(range(min = 1, max = MAX_LIMIT))]
    pub limit: Option<i64>,
}

impl ListAnimalsQuery {
    /// Splits the query into repository filter and pagination.
    pub fn into_filter(self) -> (AnimalFilter, Pagination) {
        let filter = AnimalFilter {
            query: self.query.normalized_option(),
            species: self.species.normalized_option(),
            status: self.status,
            exclude: self.exclude,
        };

        (filter, Pagination::from_limit(self.limit))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn invalid_status_becomes_other() -> anyhow::Result<()> {
        let request: CreateAnimal = serde_json::from_value(json!({
            "name": "Biscuit",
            "species": "dog",
            "status": "INVALID",
        }))?;

        assert!(request.validate().is_ok());
        let model = request.into_model(Uuid::nil());
        assert_eq!(model.status, AnimalStatus::Other);
        Ok(())
    }

    #[test]
    fn missing_status_defaults_to_other() -> anyhow::Result<()> {
        let request: CreateAnimal = serde_json::from_value(json!({
            "name": "Biscuit",
            "species": "dog",
        }))?;

        assert_eq!(request.into_model(Uuid::nil()).status, AnimalStatus::Other);
        Ok(())
    }

    #[test]
    fn creator_is_taken_from_the_caller() -> anyhow::Result<()> {
        let caller = Uuid::new_v4();
        let request: CreateAnimal = serde_json::from_value(json!({
            "name": " Biscuit ",
            "species": "dog",
            "createdById": Uuid::new_v4(),
            "city": "  ",
        }))?;

        let model = request.into_model(caller);
        assert_eq!(model.created_by_id, caller);
        assert_eq!(model.name, "Biscuit");
        assert_eq!(model.city, None);
        Ok(())
    }

    #[test]
    fn blank_name_is_rejected() -> anyhow::Result<()> {
        let request: CreateAnimal = serde_json::from_value(json!({
            "name": "   ",
            "species": "dog",
        }))?;

        assert!(request.validate().is_err());
        Ok(())
    }

    #[test]
    fn update_status_is_coerced() -> anyhow::Result<()> {
        let request: UpdateAnimal = serde_json::from_value(json!({ "status": "nope" }))?;
        assert_eq!(request.into_model().status, Some(AnimalStatus::Other));

        let request: UpdateAnimal = serde_json::from_value(json!({}))?;
        assert!(request.into_model().is_empty());
        Ok(())
    }

    #[test]
    fn list_limit_is_bounded() {
        let query = ListAnimalsQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let (filter, pagination) = ListAnimalsQuery {
            query: Some("  ".into()),
            ..Default::default()
        }
        .into_filter();
        assert_eq!(filter.query, None);
        assert_eq!(pagination, Pagination::default());
    }
}

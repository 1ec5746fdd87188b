//! Animal response types.

use jiff::Timestamp;
use paws_postgres::model;
use paws_postgres::types::AnimalStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Animal response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: Uuid,
    /// User who listed the animal.
    pub created_by_id: Uuid,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub status: AnimalStatus,
    pub image_url: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Animal {
    pub fn from_model(animal: model::Animal) -> Self {
        Self {
            id: animal.id,
            created_by_id: animal.created_by_id,
            name: animal.name,
            species: animal.species,
            breed: animal.breed,
            age: animal.age,
            gender: animal.gender,
            description: animal.description,
            status: animal.status,
            image_url: animal.image_url,
            city: animal.city,
            state: animal.state,
            created_at: animal.created_at.into(),
            updated_at: animal.updated_at.into(),
        }
    }

    pub fn from_models(animals: Vec<model::Animal>) -> Animals {
        animals.into_iter().map(Self::from_model).collect()
    }
}

/// Response for listing animals.
pub type Animals = Vec<Animal>;

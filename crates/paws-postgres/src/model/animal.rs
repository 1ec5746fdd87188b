//! Animal model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::animals;
use crate::types::AnimalStatus;

/// Animal listed by a volunteer or organization account.
///
/// Ownership is anchored on `created_by_id`; the owning organization is the
/// creator's organization and is resolved with one extra lookup.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = animals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Animal {
    pub id: Uuid,
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

/// Data for creating a new animal.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = animals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewAnimal {
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
}

/// Data for updating an animal.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = animals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateAnimal {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub status: Option<AnimalStatus>,
    pub image_url: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl UpdateAnimal {
    /// Returns whether the changeset would not modify any column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.breed.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.image_url.is_none()
            && self.city.is_none()
            && self.state.is_none()
    }
}

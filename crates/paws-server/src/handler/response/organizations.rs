//! Organization response types.

use jiff::Timestamp;
use paws_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organization response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub registration_number: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub logo_url: Option<String>,
    /// Whether an administrator has reviewed the organization.
    pub verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Organization {
    pub fn from_model(organization: model::Organization) -> Self {
        Self {
            id: organization.id,
            name: organization.name,
            registration_number: organization.registration_number,
            email: organization.email,
            phone: organization.phone,
            website: organization.website,
            description: organization.description,
            address: organization.address,
            city: organization.city,
            state: organization.state,
            logo_url: organization.logo_url,
            verified: organization.verified,
            created_at: organization.created_at.into(),
            updated_at: organization.updated_at.into(),
        }
    }

    pub fn from_models(organizations: Vec<model::Organization>) -> Organizations {
        organizations.into_iter().map(Self::from_model).collect()
    }
}

/// Response for listing organizations.
pub type Organizations = Vec<Organization>;

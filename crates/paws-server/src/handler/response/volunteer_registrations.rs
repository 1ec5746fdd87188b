//! Volunteer registration response types.

use jiff::Timestamp;
use paws_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration response. The password hash is never included.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub motivation: Option<String>,
    /// Whether the registration was approved.
    pub verified: bool,
    /// Account created on approval.
    pub user_id: Option<Uuid>,
    pub created_at: Timestamp,
}

impl Registration {
    pub fn from_model(registration: model::VolunteerRegistration) -> Self {
        Self {
            id: registration.id,
            organization_id: registration.organization_id,
            email: registration.email,
            first_name: registration.first_name,
            last_name: registration.last_name,
            phone: registration.phone,
            city: registration.city,
            state: registration.state,
            motivation: registration.motivation,
            verified: registration.verified,
            user_id: registration.user_id,
            created_at: registration.created_at.into(),
        }
    }

    pub fn from_models(registrations: Vec<model::VolunteerRegistration>) -> Registrations {
        registrations.into_iter().map(Self::from_model).collect()
    }
}

/// Response for listing pending registrations.
pub type Registrations = Vec<Registration>;

//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for animal operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPathParams {
    /// Unique identifier of the animal.
    pub animal_id: Uuid,
}

/// Path parameters for organization operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPathParams {
    /// Unique identifier of the organization.
    pub organization_id: Uuid,
}

/// Path parameters for volunteer profile operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerPathParams {
    /// Unique identifier of the volunteer's user account.
    pub volunteer_id: Uuid,
}

/// Path parameters for volunteer registration operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPathParams {
    /// Unique identifier of the pending registration.
    pub registration_id: Uuid,
}

/// Path parameters for content block operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlockPathParams {
    /// Unique identifier of the content block.
    pub block_id: Uuid,
}

/// Query parameters for routes that address a resource with `?id=`.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
pub struct IdQuery {
    /// Unique identifier of the target resource.
    pub id: Uuid,
}

//! Organization model for PostgreSQL database operations.
//!
//! An organization is a registered rescue group. It is administered through
//! one or more `ORGANIZATION` role accounts in the `users` table and owns
//! content blocks directly and animals transitively through its members.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::organizations;

/// Registered rescue organization.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Organization {
    /// Unique organization identifier.
    pub id: Uuid,
    /// Public display name.
    pub name: String,
    /// Official registration number, unique across organizations.
    pub registration_number: String,
    /// Contact email, unique case-insensitively.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Public website.
    pub website: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// URL of the organization logo.
    pub logo_url: Option<String>,
    /// Whether the organization passed manual review.
    pub verified: bool,
    /// Timestamp when the organization was created.
    pub created_at: Timestamp,
    /// Timestamp when the organization was last updated.
    pub updated_at: Timestamp,
}

/// Data for registering a new organization.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewOrganization {
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
}

/// Data for updating an organization.
///
/// The registration number is absent on purpose: it cannot change once
/// registered. `verified` is only set by the administrative verify flow.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub logo_url: Option<String>,
    pub verified: Option<bool>,
}

impl UpdateOrganization {
    /// Returns whether the changeset would not modify any column.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.website.is_none()
            && self.description.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.logo_url.is_none()
            && self.verified.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_changeset_is_empty() {
        assert!(UpdateOrganization::default().is_empty());

        let changes = UpdateOrganization {
            city: Some("Austin".into()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}

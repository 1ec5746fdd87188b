//! Volunteer registration model.
//!
//! Applicants live here until an organization approves them. Approval
//! creates the matching `users` row and flips `verified` in the same
//! transaction.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::volunteer_registrations;

/// Pending or approved volunteer application.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = volunteer_registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VolunteerRegistration {
    /// Unique registration identifier.
    pub id: Uuid,
    /// Organization the applicant wants to join.
    pub organization_id: Uuid,
    /// Applicant email.
    pub email: String,
    /// Argon2 PHC string, copied to the user on approval.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Why the applicant wants to volunteer.
    pub motivation: Option<String>,
    /// Whether the registration was approved.
    pub verified: bool,
    /// User created on approval.
    pub user_id: Option<Uuid>,
    /// Timestamp when the registration was created.
    pub created_at: Timestamp,
    /// Timestamp when the registration was last updated.
    pub updated_at: Timestamp,
}

/// Data for submitting a new registration.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = volunteer_registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewVolunteerRegistration {
    pub organization_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub motivation: Option<String>,
}

impl VolunteerRegistration {
    /// Returns whether the registration still awaits a decision.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.verified
    }
}

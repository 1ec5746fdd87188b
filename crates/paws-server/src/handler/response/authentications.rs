//! Authentication response types.

use jiff::Timestamp;
use paws_postgres::types::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authz::Identity;

/// Normalized identity of the caller.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub user_id: Uuid,
    /// Canonical role: `VOLUNTEER`, `ORGANIZATION` or `ADMIN`.
    pub role: UserRole,
    /// Whether the account may perform write actions.
    pub verified: bool,
    /// Organization the account administers or volunteers for.
    pub organization_id: Option<Uuid>,
}

impl SessionIdentity {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            user_id: identity.user_id,
            role: identity.role(),
            verified: identity.verified,
            organization_id: identity.organization_id(),
        }
    }
}

/// Response returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    /// Timestamp when the token expires.
    pub expires_at: Timestamp,
    pub identity: SessionIdentity,
}

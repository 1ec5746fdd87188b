//! Normalized caller identity.

use paws_postgres::types::UserRole;
use uuid::Uuid;

use super::TRACING_TARGET;
use crate::extract::AuthClaims;

/// Who is acting, with the affiliation the rules engine matches on.
///
/// Organization accounts always carry the id of the organization they
/// administer; it is never the account's own user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    /// Account administering an organization.
    OrgAccount { user_id: Uuid, organization_id: Uuid },
    /// Volunteer, optionally affiliated with one organization.
    VolunteerAccount {
        user_id: Uuid,
        organization_id: Option<Uuid>,
    },
    /// Platform administrator.
    AdminAccount { user_id: Uuid },
}

impl Actor {
    /// Returns the canonical role of the actor.
    pub const fn role(&self) -> UserRole {
        match self {
            Self::OrgAccount { .. } => UserRole::Organization,
            Self::VolunteerAccount { .. } => UserRole::Volunteer,
            Self::AdminAccount { .. } => UserRole::Admin,
        }
    }

    /// Returns the organization the actor is affiliated with.
    pub const fn organization_id(&self) -> Option<Uuid> {
        match *self {
            Self::OrgAccount {
                organization_id, ..
            } => Some(organization_id),
            Self::VolunteerAccount {
                organization_id, ..
            } => organization_id,
            Self::AdminAccount { .. } => None,
        }
    }
}

/// Identity of the caller for one request. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user_id: Uuid,
    pub actor: Actor,
    pub verified: bool,
}

impl Identity {
    /// Builds an identity from already canonical parts.
    ///
    /// Returns `None` for an organization role without an organization,
    /// which cannot be matched against any resource.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        verified: bool,
        organization_id: Option<Uuid>,
    ) -> Option<Self> {
        let actor = match role {
            UserRole::Admin => Actor::AdminAccount { user_id },
            UserRole::Organization => Actor::OrgAccount {
                user_id,
                organization_id: organization_id?,
            },
            UserRole::Volunteer => Actor::VolunteerAccount {
                user_id,
                organization_id,
            },
        };

        Some(Self {
            user_id,
            actor,
            verified,
        })
    }

    /// Returns the canonical role.
    #[inline]
    pub const fn role(&self) -> UserRole {
        self.actor.role()
    }

    /// Returns the organization affiliation, if any.
    #[inline]
    pub const fn organization_id(&self) -> Option<Uuid> {
        self.actor.organization_id()
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self.actor, Actor::AdminAccount { .. })
    }

    /// Returns whether this identity is the user with the given id.
    #[inline]
    pub fn is_user(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

/// Turns verified session claims into an [`Identity`].
///
/// Role strings are matched case-insensitively. Unknown roles and
/// organization roles without an organization resolve to `None`, which
/// callers treat as unauthenticated.
pub fn resolve_identity(claims: &AuthClaims) -> Option<Identity> {
    let Some(role) = UserRole::parse_lenient(&claims.role) else {
        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %claims.user_id,
            role = %claims.role,
            "unknown role in session"
        );
        return None;
    };

    let identity = Identity::new(
        claims.user_id,
        role,
        claims.verified,
        claims.organization_id,
    );

    if identity.is_none() {
        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %claims.user_id,
            "organization session without organization"
        );
    }

    identity
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;

    fn claims(role: &str, organization_id: Option<Uuid>) -> AuthClaims {
        let issued_at = Timestamp::now();
        let expires_at = issued_at + SignedDuration::from_hours(1);
        AuthClaims::new(
            Uuid::new_v4(),
            role,
            true,
            organization_id,
            issued_at,
            expires_at,
        )
    }

    #[test]
    fn role_casing_is_normalized() {
        let organization_id = Uuid::new_v4();
        for role in ["organization", "ORGANIZATION", "Organization"] {
            let identity = resolve_identity(&claims(role, Some(organization_id)));
            let identity = identity.expect("organization identity");
            assert_eq!(identity.role(), UserRole::Organization);
            assert_eq!(identity.organization_id(), Some(organization_id));
        }
    }

    #[test]
    fn unknown_role_is_unauthenticated() {
        assert!(resolve_identity(&claims("adopter", None)).is_none());
        assert!(resolve_identity(&claims("", None)).is_none());
    }

    #[test]
    fn organization_without_organization_is_unauthenticated() {
        assert!(resolve_identity(&claims("ORGANIZATION", None)).is_none());
    }

    #[test]
    fn volunteer_organization_is_optional() {
        let identity = resolve_identity(&claims("volunteer", None)).expect("volunteer");
        assert_eq!(
            identity.actor,
            Actor::VolunteerAccount {
                user_id: identity.user_id,
                organization_id: None,
            }
        );
    }

    #[test]
    fn admin_drops_organization() {
        let identity =
            resolve_identity(&claims("admin", Some(Uuid::new_v4()))).expect("admin identity");
        assert!(identity.is_admin());
        assert_eq!(identity.organization_id(), None);
    }

    #[test]
    fn verified_flag_is_carried() {
        let mut unverified = claims("VOLUNTEER", None);
        unverified.verified = false;
        let identity = resolve_identity(&unverified).expect("volunteer");
        assert!(!identity.verified);
    }
}

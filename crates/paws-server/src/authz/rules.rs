//! Ordered authorization rules.

use uuid::Uuid;

use super::{Actor, Identity, OwnerFacts, ResourceKind, TRACING_TARGET};
use crate::handler::{ErrorKind, Result};

/// Operation a caller attempts on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    /// Approve a volunteer into an organization.
    Invite,
    /// Take a volunteer out of an organization.
    Remove,
}

impl Action {
    /// Every action except [`Action::Read`] changes state.
    #[inline]
    pub const fn is_write(self) -> bool {
        !matches!(self, Self::Read)
    }
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyUnauthenticated,
    DenyForbidden,
}

impl Decision {
    #[inline]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Maps the decision onto a handler error.
    ///
    /// Private kinds report a forbidden decision as not found so that the
    /// existence of the resource is not revealed.
    pub fn into_result(self, kind: ResourceKind) -> Result<()> {
        match self {
            Self::Allow => Ok(()),
            Self::DenyUnauthenticated => Err(ErrorKind::MissingAuthToken.into_error()),
            Self::DenyForbidden if kind.is_private() => Err(ErrorKind::NotFound
                .with_message(format!("{} not found", capitalize(kind.as_str())))
                .with_resource(kind.as_str())),
            Self::DenyForbidden => Err(ErrorKind::Forbidden.with_resource(kind.as_str())),
        }
    }
}

fn capitalize(resource: &str) -> String {
    let resource = resource.replace('_', " ");
    let mut chars = resource.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Decides whether `identity` may perform `action` on the resource.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. No identity is unauthenticated.
/// 2. Administrators may do anything.
/// 3. Unverified identities may not write.
/// 4. Owners may do anything with what they own.
/// 5. Per-kind rules based on organization affiliation.
/// 6. Everything else is forbidden.
pub fn authorize(identity: Option<&Identity>, action: Action, owner: &OwnerFacts) -> Decision {
    let Some(identity) = identity else {
        return Decision::DenyUnauthenticated;
    };

    if identity.is_admin() {
        return Decision::Allow;
    }

    if action.is_write() && !identity.verified {
        return Decision::DenyForbidden;
    }

    if owner.owner_id == Some(identity.user_id) {
        return Decision::Allow;
    }

    if kind_allows(identity, action, owner) {
        Decision::Allow
    } else {
        Decision::DenyForbidden
    }
}

/// Per-kind affiliation rules.
fn kind_allows(identity: &Identity, action: Action, owner: &OwnerFacts) -> bool {
    let same_organization = |organization_id: Uuid| owner.organization_id == Some(organization_id);

    match (owner.kind, identity.actor) {
        // Organizations manage every animal of their members.
        (ResourceKind::Animal, Actor::OrgAccount {
            organization_id, ..
        }) => same_organization(organization_id),
        // Volunteers see the animals of their organization.
        (ResourceKind::Animal, Actor::VolunteerAccount {
            organization_id: Some(organization_id),
            ..
        }) => action == Action::Read && same_organization(organization_id),

        (ResourceKind::Organization, actor) => match action {
            Action::Read => true,
            Action::Update => matches!(
                actor,
                Actor::OrgAccount { organization_id, .. } if same_organization(organization_id)
            ),
            _ => false,
        },

        (ResourceKind::ContentBlock, actor) => match action {
            Action::Read => true,
            Action::Create | Action::Update | Action::Delete => matches!(
                actor,
                Actor::OrgAccount { organization_id, .. } if same_organization(organization_id)
            ),
            Action::Invite | Action::Remove => false,
        },

        (ResourceKind::VolunteerStory, _) | (ResourceKind::UserProfile, _) => {
            action == Action::Read
        }

        (ResourceKind::Media, Actor::OrgAccount {
            organization_id, ..
        }) => same_organization(organization_id),

        (ResourceKind::Membership, Actor::OrgAccount {
            organization_id, ..
        }) => same_organization(organization_id),

        _ => false,
    }
}

/// Authorizes and converts the decision into a handler result.
///
/// A forbidden write on a private resource the caller may still read is
/// reported as `403 Forbidden`. Everything else follows
/// [`Decision::into_result`].
pub fn enforce(identity: Option<&Identity>, action: Action, owner: &OwnerFacts) -> Result<()> {
    let decision = authorize(identity, action, owner);

    if !decision.is_allowed() {
        tracing::debug!(
            target: TRACING_TARGET,
            user_id = ?identity.map(|identity| identity.user_id),
            resource = owner.kind.as_str(),
            action = action.as_ref(),
            decision = ?decision,
            "authorization denied"
        );
    }

    if decision == Decision::DenyForbidden
        && action.is_write()
        && owner.kind.is_private()
        && authorize(identity, Action::Read, owner).is_allowed()
    {
        return Err(ErrorKind::Forbidden.with_resource(owner.kind.as_str()));
    }

    decision.into_result(owner.kind)
}

#[cfg(test)]
mod tests {
    use paws_postgres::types::UserRole;

    use super::*;

    const ALL_ACTIONS: [Action; 6] = [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Invite,
        Action::Remove,
    ];

    const WRITE_ACTIONS: [Action; 5] = [
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Invite,
        Action::Remove,
    ];

    const ALL_KINDS: [ResourceKind; 7] = [
        ResourceKind::Animal,
        ResourceKind::Organization,
        ResourceKind::VolunteerStory,
        ResourceKind::ContentBlock,
        ResourceKind::Media,
        ResourceKind::UserProfile,
        ResourceKind::Membership,
    ];

    fn volunteer(organization_id: Option<Uuid>) -> Identity {
        Identity::new(Uuid::new_v4(), UserRole::Volunteer, true, organization_id)
            .expect("volunteer identity")
    }

    fn organization(organization_id: Uuid) -> Identity {
        Identity::new(
            Uuid::new_v4(),
            UserRole::Organization,
            true,
            Some(organization_id),
        )
        .expect("organization identity")
    }

    fn admin() -> Identity {
        Identity::new(Uuid::new_v4(), UserRole::Admin, false, None).expect("admin identity")
    }

    fn unverified(mut identity: Identity) -> Identity {
        identity.verified = false;
        identity
    }

    fn facts(kind: ResourceKind, owner: Option<Uuid>, organization: Option<Uuid>) -> OwnerFacts {
        OwnerFacts::new(kind, owner, organization)
    }

    #[test]
    fn anonymous_is_always_unauthenticated() {
        for kind in ALL_KINDS {
            for action in ALL_ACTIONS {
                let owner = facts(kind, Some(Uuid::new_v4()), Some(Uuid::new_v4()));
                assert_eq!(
                    authorize(None, action, &owner),
                    Decision::DenyUnauthenticated
                );
            }
        }
    }

    #[test]
    fn admin_is_always_allowed() {
        let admin = admin();
        for kind in ALL_KINDS {
            for action in ALL_ACTIONS {
                let owner = facts(kind, Some(Uuid::new_v4()), None);
                assert_eq!(authorize(Some(&admin), action, &owner), Decision::Allow);
            }
        }
    }

    #[test]
    fn owner_is_allowed_everything() {
        let caller = volunteer(None);
        for kind in ALL_KINDS {
            for action in ALL_ACTIONS {
                let owner = facts(kind, Some(caller.user_id), None);
                assert_eq!(authorize(Some(&caller), action, &owner), Decision::Allow);
            }
        }
    }

    #[test]
    fn unverified_writes_are_forbidden() {
        let organization_id = Uuid::new_v4();
        let callers = [
            unverified(volunteer(None)),
            unverified(organization(organization_id)),
        ];

        for caller in callers {
            for kind in ALL_KINDS {
                for action in WRITE_ACTIONS {
                    let owner = facts(kind, Some(caller.user_id), Some(organization_id));
                    assert_eq!(
                        authorize(Some(&caller), action, &owner),
                        Decision::DenyForbidden,
                        "{kind:?} {action:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn unverified_reads_are_allowed() {
        let caller = unverified(volunteer(None));
        let owner = facts(ResourceKind::Animal, Some(caller.user_id), None);
        assert_eq!(authorize(Some(&caller), Action::Read, &owner), Decision::Allow);
    }

    #[test]
    fn volunteers_cannot_touch_each_others_animals() {
        let caller = volunteer(None);
        let owner = facts(ResourceKind::Animal, Some(Uuid::new_v4()), None);
        for action in ALL_ACTIONS {
            assert_eq!(
                authorize(Some(&caller), action, &owner),
                Decision::DenyForbidden
            );
        }
    }

    #[test]
    fn volunteers_read_animals_of_their_organization() {
        let organization_id = Uuid::new_v4();
        let caller = volunteer(Some(organization_id));
        let owner = facts(
            ResourceKind::Animal,
            Some(Uuid::new_v4()),
            Some(organization_id),
        );

        assert_eq!(authorize(Some(&caller), Action::Read, &owner), Decision::Allow);
        assert_eq!(
            authorize(Some(&caller), Action::Update, &owner),
            Decision::DenyForbidden
        );
    }

    #[test]
    fn organizations_manage_animals_of_their_members() {
        let organization_id = Uuid::new_v4();
        let caller = organization(organization_id);

        let member_animal = facts(
            ResourceKind::Animal,
            Some(Uuid::new_v4()),
            Some(organization_id),
        );
        for action in [Action::Read, Action::Update, Action::Delete] {
            assert_eq!(
                authorize(Some(&caller), action, &member_animal),
                Decision::Allow
            );
        }

        let foreign_animal = facts(
            ResourceKind::Animal,
            Some(Uuid::new_v4()),
            Some(Uuid::new_v4()),
        );
        assert_eq!(
            authorize(Some(&caller), Action::Update, &foreign_animal),
            Decision::DenyForbidden
        );

        let unaffiliated_animal = facts(ResourceKind::Animal, Some(Uuid::new_v4()), None);
        assert_eq!(
            authorize(Some(&caller), Action::Read, &unaffiliated_animal),
            Decision::DenyForbidden
        );
    }

    #[test]
    fn organization_profile_rules() {
        let organization_id = Uuid::new_v4();
        let caller = organization(organization_id);
        let own = facts(
            ResourceKind::Organization,
            Some(organization_id),
            Some(organization_id),
        );
        let other_id = Uuid::new_v4();
        let other = facts(ResourceKind::Organization, Some(other_id), Some(other_id));

        assert_eq!(authorize(Some(&caller), Action::Read, &other), Decision::Allow);
        assert_eq!(authorize(Some(&caller), Action::Update, &own), Decision::Allow);
        assert_eq!(
            authorize(Some(&caller), Action::Update, &other),
            Decision::DenyForbidden
        );
        assert_eq!(
            authorize(Some(&caller), Action::Delete, &own),
            Decision::DenyForbidden
        );
        assert_eq!(
            authorize(Some(&volunteer(None)), Action::Update, &own),
            Decision::DenyForbidden
        );
    }

    #[test]
    fn content_blocks_are_written_by_their_organization() {
        let organization_id = Uuid::new_v4();
        let block = facts(ResourceKind::ContentBlock, None, Some(organization_id));

        for action in [Action::Create, Action::Update, Action::Delete] {
            assert_eq!(
                authorize(Some(&organization(organization_id)), action, &block),
                Decision::Allow
            );
            assert_eq!(
                authorize(Some(&organization(Uuid::new_v4())), action, &block),
                Decision::DenyForbidden
            );
            assert_eq!(
                authorize(Some(&volunteer(Some(organization_id))), action, &block),
                Decision::DenyForbidden
            );
        }

        assert_eq!(
            authorize(Some(&volunteer(None)), Action::Read, &block),
            Decision::Allow
        );
    }

    #[test]
    fn stories_are_public_but_written_by_authors() {
        let story = facts(ResourceKind::VolunteerStory, Some(Uuid::new_v4()), None);
        let caller = volunteer(None);

        assert_eq!(authorize(Some(&caller), Action::Read, &story), Decision::Allow);
        for action in [Action::Update, Action::Delete] {
            assert_eq!(
                authorize(Some(&caller), action, &story),
                Decision::DenyForbidden
            );
        }

        let orphan = facts(ResourceKind::VolunteerStory, None, None);
        assert_eq!(
            authorize(Some(&caller), Action::Delete, &orphan),
            Decision::DenyForbidden
        );
    }

    #[test]
    fn membership_is_managed_by_the_organization() {
        let organization_id = Uuid::new_v4();
        let roster = OwnerFacts::membership(Some(organization_id));

        for action in [Action::Read, Action::Invite, Action::Remove] {
            assert_eq!(
                authorize(Some(&organization(organization_id)), action, &roster),
                Decision::Allow
            );
            assert_eq!(
                authorize(Some(&organization(Uuid::new_v4())), action, &roster),
                Decision::DenyForbidden
            );
        }

        assert_eq!(
            authorize(
                Some(&volunteer(Some(organization_id))),
                Action::Invite,
                &roster
            ),
            Decision::DenyForbidden
        );
    }

    #[test]
    fn delete_is_never_looser_than_update() {
        let organization_id = Uuid::new_v4();
        let callers = [
            volunteer(None),
            volunteer(Some(organization_id)),
            organization(organization_id),
            organization(Uuid::new_v4()),
        ];

        for caller in callers {
            for kind in ALL_KINDS {
                let owner = facts(kind, Some(Uuid::new_v4()), Some(organization_id));
                let update = authorize(Some(&caller), Action::Update, &owner);
                let delete = authorize(Some(&caller), Action::Delete, &owner);
                if delete.is_allowed() {
                    assert!(update.is_allowed(), "{kind:?}");
                }
            }
        }
    }

    #[test]
    fn private_denials_are_reported_as_not_found() {
        let caller = volunteer(None);
        let animal = facts(ResourceKind::Animal, Some(Uuid::new_v4()), None);

        let error = enforce(Some(&caller), Action::Read, &animal).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let error = enforce(Some(&caller), Action::Delete, &animal).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let media = facts(ResourceKind::Media, Some(Uuid::new_v4()), None);
        let error = enforce(Some(&caller), Action::Read, &media).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn readable_private_resources_report_forbidden_writes() {
        let organization_id = Uuid::new_v4();
        let caller = volunteer(Some(organization_id));
        let animal = facts(
            ResourceKind::Animal,
            Some(Uuid::new_v4()),
            Some(organization_id),
        );

        let error = enforce(Some(&caller), Action::Update, &animal).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn public_denials_are_reported_as_forbidden() {
        let caller = volunteer(None);
        let story = facts(ResourceKind::VolunteerStory, Some(Uuid::new_v4()), None);

        let error = enforce(Some(&caller), Action::Update, &story).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Forbidden);

        let error = enforce(None, Action::Update, &story).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingAuthToken);
    }
}

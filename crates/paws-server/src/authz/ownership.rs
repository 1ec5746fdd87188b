//! Ownership anchors of loaded resources.

use paws_postgres::model::{Animal, ContentBlock, Media, Organization, User, VolunteerStory};
use uuid::Uuid;

/// Whether the existence of a resource may be revealed to callers who
/// are not allowed to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensitivity {
    /// Denied reads are reported as `403 Forbidden`.
    Public,
    /// Denied reads are reported as `404 Not Found`.
    Private,
}

/// Kind of resource being acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Animal,
    Organization,
    VolunteerStory,
    ContentBlock,
    Media,
    UserProfile,
    /// An organization's volunteer roster: registrations and members.
    Membership,
}

impl ResourceKind {
    pub const fn sensitivity(self) -> Sensitivity {
        match self {
            Self::Animal | Self::Media => Sensitivity::Private,
            Self::Organization
            | Self::VolunteerStory
            | Self::ContentBlock
            | Self::UserProfile
            | Self::Membership => Sensitivity::Public,
        }
    }

    #[inline]
    pub const fn is_private(self) -> bool {
        matches!(self.sensitivity(), Sensitivity::Private)
    }

    /// Resource name used in error responses.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Organization => "organization",
            Self::VolunteerStory => "volunteer_story",
            Self::ContentBlock => "content_block",
            Self::Media => "media",
            Self::UserProfile => "user",
            Self::Membership => "membership",
        }
    }
}

/// Who owns a resource and which organization it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerFacts {
    pub kind: ResourceKind,
    pub owner_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
}

impl OwnerFacts {
    /// Facts for a resource about to be created, or any resource not
    /// covered by a dedicated constructor.
    pub const fn new(
        kind: ResourceKind,
        owner_id: Option<Uuid>,
        organization_id: Option<Uuid>,
    ) -> Self {
        Self {
            kind,
            owner_id,
            organization_id,
        }
    }

    /// An animal is owned by its creator and belongs to the creator's
    /// organization, which the caller looks up beforehand.
    pub fn animal(animal: &Animal, creator_organization_id: Option<Uuid>) -> Self {
        Self::new(
            ResourceKind::Animal,
            Some(animal.created_by_id),
            creator_organization_id,
        )
    }

    /// Stories without an author have no individual owner.
    pub fn volunteer_story(story: &VolunteerStory) -> Self {
        Self::new(ResourceKind::VolunteerStory, story.volunteer_id, None)
    }

    pub fn content_block(block: &ContentBlock) -> Self {
        Self::new(
            ResourceKind::ContentBlock,
            None,
            Some(block.organization_id),
        )
    }

    /// An organization anchors itself.
    pub fn organization(organization: &Organization) -> Self {
        Self::new(
            ResourceKind::Organization,
            Some(organization.id),
            Some(organization.id),
        )
    }

    pub fn media(media: &Media) -> Self {
        Self::new(
            ResourceKind::Media,
            Some(media.user_id),
            media.organization_id,
        )
    }

    pub fn user_profile(user: &User) -> Self {
        Self::new(
            ResourceKind::UserProfile,
            Some(user.id),
            user.organization_id,
        )
    }

    /// Facts for approving, rejecting or removing volunteers of an organization.
    pub const fn membership(target_organization_id: Option<Uuid>) -> Self {
        Self::new(ResourceKind::Membership, None, target_organization_id)
    }
}

#[cfg(test)]
mod tests {
    use paws_postgres::types::AnimalStatus;

    use super::*;

    fn epoch() -> jiff_diesel::Timestamp {
        jiff::Timestamp::UNIX_EPOCH.into()
    }

    fn animal(created_by_id: Uuid) -> Animal {
        Animal {
            id: Uuid::new_v4(),
            created_by_id,
            name: "Biscuit".into(),
            species: "dog".into(),
            breed: None,
            age: None,
            gender: None,
            description: None,
            status: AnimalStatus::Adoption,
            image_url: None,
            city: None,
            state: None,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn story(volunteer_id: Option<Uuid>) -> VolunteerStory {
        VolunteerStory {
            id: Uuid::new_v4(),
            volunteer_id,
            title: "First rescue".into(),
            slug: "first-rescue".into(),
            excerpt: None,
            content: "...".into(),
            image_url: None,
            featured: false,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn block(organization_id: Uuid) -> ContentBlock {
        ContentBlock {
            id: Uuid::new_v4(),
            organization_id,
            block_type: "hero".into(),
            content: serde_json::json!({}),
            position: 0,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn media(user_id: Uuid, organization_id: Option<Uuid>) -> Media {
        Media {
            id: Uuid::new_v4(),
            file_key: "uploads/a.png".into(),
            url: "http://localhost/media/uploads/a.png".into(),
            content_type: None,
            size_bytes: 1,
            user_id,
            organization_id,
            animal_id: None,
            created_at: epoch(),
            deleted_at: None,
            upload_expires_at: None,
        }
    }

    #[test]
    fn animal_is_owned_by_creator() {
        let creator = Uuid::new_v4();
        let organization = Uuid::new_v4();
        let facts = OwnerFacts::animal(&animal(creator), Some(organization));

        assert_eq!(facts.kind, ResourceKind::Animal);
        assert_eq!(facts.owner_id, Some(creator));
        assert_eq!(facts.organization_id, Some(organization));
    }

    #[test]
    fn orphan_story_has_no_owner() {
        let facts = OwnerFacts::volunteer_story(&story(None));
        assert_eq!(facts.owner_id, None);
        assert_eq!(facts.organization_id, None);
    }

    #[test]
    fn content_block_belongs_to_organization_only() {
        let organization = Uuid::new_v4();
        let facts = OwnerFacts::content_block(&block(organization));
        assert_eq!(facts.owner_id, None);
        assert_eq!(facts.organization_id, Some(organization));
    }

    #[test]
    fn media_is_owned_by_uploader() {
        let uploader = Uuid::new_v4();
        let facts = OwnerFacts::media(&media(uploader, None));
        assert_eq!(facts.owner_id, Some(uploader));
        assert_eq!(facts.kind, ResourceKind::Media);
    }

    #[test]
    fn sensitivity_classes() {
        assert!(ResourceKind::Animal.is_private());
        assert!(ResourceKind::Media.is_private());
        assert!(!ResourceKind::VolunteerStory.is_private());
        assert!(!ResourceKind::Organization.is_private());
        assert!(!ResourceKind::UserProfile.is_private());
    }
}

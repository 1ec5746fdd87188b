//! Database query repositories for all entities in the system.
//!
//! Every repository is a trait implemented for [`PgConnection`], so any
//! pooled connection or transaction handle can call it directly.
//!
//! [`PgConnection`]: crate::PgConnection

mod animal;
mod content_block;
mod media;
mod organization;
mod user;
mod volunteer_registration;
mod volunteer_story;

pub use animal::{AnimalFilter, AnimalRepository, AnimalVisibility};
pub use content_block::ContentBlockRepository;
pub use media::MediaRepository;
pub use organization::OrganizationRepository;
pub use user::UserRepository;
pub use volunteer_registration::VolunteerRegistrationRepository;
pub use volunteer_story::VolunteerStoryRepository;

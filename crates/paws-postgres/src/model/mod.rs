//! Database models for all entities in the system.
//!
//! Each table has a `Queryable` row type, an `Insertable` `New*` type and,
//! where rows are mutable, an `AsChangeset` `Update*` type.

mod animal;
mod content_block;
mod media;
mod organization;
mod user;
mod volunteer_registration;
mod volunteer_story;

pub use animal::{Animal, NewAnimal, UpdateAnimal};
pub use content_block::{ContentBlock, NewContentBlock, UpdateContentBlock};
pub use media::{Media, NewMedia};
pub use organization::{NewOrganization, Organization, UpdateOrganization};
pub use user::{NewUser, UpdateUser, User};
pub use volunteer_registration::{NewVolunteerRegistration, VolunteerRegistration};
pub use volunteer_story::{NewVolunteerStory, UpdateVolunteerStory, VolunteerStory};

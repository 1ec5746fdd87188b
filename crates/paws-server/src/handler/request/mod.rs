//! Request types for HTTP handlers.

mod animals;
mod authentications;
mod content_blocks;
mod organizations;
mod paginations;
mod paths;
mod uploads;
mod users;
mod validations;
mod volunteer_registrations;
mod volunteer_stories;

pub use animals::*;
pub use authentications::*;
pub use content_blocks::*;
pub use organizations::*;
pub use paginations::*;
pub use paths::*;
pub use uploads::*;
pub use users::*;
pub use validations::*;
pub use volunteer_registrations::*;
pub use volunteer_stories::*;

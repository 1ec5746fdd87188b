//! Response types for HTTP handlers.
//!
//! Every endpoint returns one fixed shape; lists are plain JSON arrays.

mod animals;
mod authentications;
mod content_blocks;
mod error_response;
mod monitors;
mod organizations;
mod profiles;
mod uploads;
mod volunteer_registrations;
mod volunteer_stories;

pub use animals::*;
pub use authentications::*;
pub use content_blocks::*;
pub use error_response::ErrorResponse;
pub use monitors::*;
pub use organizations::*;
pub use profiles::*;
pub use uploads::*;
pub use volunteer_registrations::*;
pub use volunteer_stories::*;

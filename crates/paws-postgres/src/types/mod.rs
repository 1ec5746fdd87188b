//! Contains constraints, enumerations and other custom types.

mod constraints;
mod enums;
mod pagination;

pub use constraints::{
    AnimalConstraints, ConstraintCategory, ConstraintViolation, ContentBlockConstraints,
    MediaConstraints, OrganizationConstraints, UserConstraints, VolunteerRegistrationConstraints,
    VolunteerStoryConstraints,
};
pub use enums::{AnimalStatus, UserRole};
pub use pagination::{DEFAULT_LIMIT, MAX_LIMIT, Pagination};

//! Enumerations mirroring the PostgreSQL enum types.

mod animal_status;
mod user_role;

pub use animal_status::AnimalStatus;
pub use user_role::UserRole;

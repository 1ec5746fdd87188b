//! Password hashing, session keys and rate limiting.

mod password_hasher;
mod rate_limiter;
mod session_keys;

pub use password_hasher::PasswordHasher;
pub use rate_limiter::{RateLimitKey, RateLimiter};
pub use session_keys::{MIN_SECRET_LEN, SessionKeys};

//! Rate limiting middleware for abuse-prone routes.

mod by_ip;

pub use by_ip::rate_limit_by_ip;

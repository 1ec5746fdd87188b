//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Authentication ([`require_authentication`])
//! - Rate limiting ([`rate_limit_by_ip`])
//! - Security (CORS, hardening headers, body limits)
//! - Observability (request ids, tracing, header redaction)
//! - Error handling (timeouts, panics)
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use paws_server::middleware::{CorsConfig, RouterExt};
//!
//! let app = router
//!     .with_security_layer(&CorsConfig::default())
//!     .with_observability_layer()
//!     .with_error_handling_layer(Duration::from_secs(30));
//! ```

mod auth;
mod error_handling;
mod extensions;
mod observability;
mod rate_limiting;
mod security;

pub use auth::require_authentication;
pub use extensions::RouterExt;
pub use observability::REQUEST_ID_HEADER;
pub use rate_limiting::rate_limit_by_ip;
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, MAX_UPLOAD_BODY_SIZE};

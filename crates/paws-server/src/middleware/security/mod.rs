//! CORS, response hardening headers and request body limits.

mod body_limit;
mod cors;

pub use body_limit::{DEFAULT_MAX_BODY_SIZE, MAX_UPLOAD_BODY_SIZE};
pub(crate) use body_limit::create_body_limit_layer;
pub use cors::CorsConfig;
pub(crate) use cors::create_cors_layer;

//! Turns timeouts, middleware failures and panics into JSON error responses.

mod handlers;
mod panic;

pub use handlers::handle_error;
pub use panic::catch_panic;

/// Tracing target for recovered middleware errors and panics.
const TRACING_TARGET: &str = "paws_server::middleware::recovery";

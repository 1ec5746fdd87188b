//! Request body size limits.

use tower_http::limit::RequestBodyLimitLayer;

/// Maximum size of an ordinary request body: 4MB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 4 * 1024 * 1024;

/// Maximum size of an upload request body: 12MB.
pub const MAX_UPLOAD_BODY_SIZE: usize = 12 * 1024 * 1024;

/// Rejects bodies larger than `max_size` bytes with `413`.
pub fn create_body_limit_layer(max_size: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(max_size)
}

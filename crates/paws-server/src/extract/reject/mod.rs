//! Drop-in replacements for axum extractors that reject with [`Error`].
//!
//! [`Error`]: crate::handler::Error

mod enhanced_json;
mod enhanced_multipart;
mod enhanced_path;
mod enhanced_query;
mod sanitized_json;
mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_multipart::Multipart;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::sanitized_json::{PROTECTED_FIELDS, ProtectedFields, SanitizedJson};
pub use self::validated_json::ValidateJson;

/// Keeps rejection details short enough for a response body.
pub(crate) fn truncate_detail(message: &str) -> String {
    message
        .lines()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(200)
        .collect()
}

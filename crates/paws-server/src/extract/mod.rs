//! Request extractors.
//!
//! Every extractor rejects with [`handler::Error`], so clients always get
//! the same JSON error shape.
//!
//! - [`AuthState`] and `Option<AuthState>` resolve the caller.
//! - [`PgPool`] checks a connection out of the pool.
//! - [`Json`], [`Path`], [`Query`] and [`Multipart`] wrap their axum
//!   counterparts.
//! - [`ValidateJson`] validates create payloads.
//! - [`SanitizedJson`] strips protected fields from update payloads.
//!
//! [`handler::Error`]: crate::handler::Error

mod auth;
mod pg_connection;
mod reject;

pub use self::auth::{AuthClaims, AuthHeader, AuthState};
pub use self::pg_connection::PgPool;
pub use self::reject::{
    Json, Multipart, PROTECTED_FIELDS, Path, ProtectedFields, Query, SanitizedJson, ValidateJson,
};

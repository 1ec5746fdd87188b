//! Session token handling and caller identity extraction.
//!
//! - [`AuthClaims`] is what a session token carries.
//! - [`AuthHeader`] verifies the bearer token of a request.
//! - [`AuthState`] resolves the verified claims into an [`Identity`].
//!
//! [`Identity`]: crate::authz::Identity

mod auth_claims;
mod auth_header;
mod auth_state;

pub use self::auth_claims::AuthClaims;
pub use self::auth_header::AuthHeader;
pub use self::auth_state::AuthState;

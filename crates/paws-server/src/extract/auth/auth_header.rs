//! Bearer token extraction and verification.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use axum_extra::typed_header::TypedHeaderRejectionReason;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};

use super::AuthClaims;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind};
use crate::service::SessionKeys;

/// Verified claims of the `Authorization: Bearer` token.
///
/// Only checks the token itself. Use [`AuthState`] to also resolve the
/// caller's identity.
///
/// [`AuthState`]: crate::extract::AuthState
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeader(pub AuthClaims);

impl AuthHeader {
    #[inline]
    pub fn into_auth_claims(self) -> AuthClaims {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_header) = parts.extensions.get::<Self>() {
            return Ok(auth_header.clone());
        }

        type AuthBearerHeader = TypedHeader<Authorization<Bearer>>;
        let bearer = AuthBearerHeader::from_request_parts(parts, state)
            .await
            .map_err(|rejection| match rejection.reason() {
                TypedHeaderRejectionReason::Missing => ErrorKind::MissingAuthToken
                    .with_message("Authentication required")
                    .with_resource("authentication"),
                _ => ErrorKind::MalformedAuthToken
                    .with_message("Authorization header must contain a Bearer token")
                    .with_resource("authentication"),
            })?;

        let session_keys = SessionKeys::from_ref(state);
        let claims = AuthClaims::decode(bearer.token(), session_keys.decoding_key())?;

        let auth_header = Self(claims);
        parts.extensions.insert(auth_header.clone());
        Ok(auth_header)
    }
}

impl From<JwtError> for Error<'static> {
    fn from(error: JwtError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            error = %error,
            "session token rejected"
        );

        let error = match error.kind() {
            JwtErrorKind::ExpiredSignature => {
                ErrorKind::Unauthorized.with_message("Your session has expired")
            }
            JwtErrorKind::InvalidSignature => {
                ErrorKind::Unauthorized.with_message("Session token verification failed")
            }
            JwtErrorKind::InvalidAudience | JwtErrorKind::InvalidIssuer => {
                ErrorKind::Unauthorized.with_message("Session token was not issued by this service")
            }
            JwtErrorKind::MissingRequiredClaim(claim) => ErrorKind::MalformedAuthToken
                .with_message("Session token is incomplete")
                .with_context(format!("missing claim: {claim}")),
            JwtErrorKind::InvalidToken
            | JwtErrorKind::InvalidAlgorithm
            | JwtErrorKind::Base64(_)
            | JwtErrorKind::Json(_)
            | JwtErrorKind::Utf8(_) => {
                ErrorKind::MalformedAuthToken.with_message("Session token is malformed")
            }
            _ => ErrorKind::InternalServerError.into_error(),
        };

        error.with_resource("authentication")
    }
}

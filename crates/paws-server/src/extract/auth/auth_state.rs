//! Identity of the authenticated caller.

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use derive_more::Deref;

use super::AuthHeader;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::authz::{Identity, resolve_identity};
use crate::handler::{Error, ErrorKind};
use crate::service::SessionKeys;

/// Resolved [`Identity`] of the caller.
///
/// Rejects with `401` when the token is missing, invalid, or does not
/// describe a known role. `Option<AuthState>` yields `None` only when no
/// `Authorization` header is present at all.
#[derive(Debug, Clone, Copy, Deref, PartialEq, Eq)]
pub struct AuthState(pub Identity);

impl AuthState {
    #[inline]
    pub const fn identity(&self) -> &Identity {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(*auth_state);
        }

        let AuthHeader(claims) = AuthHeader::from_request_parts(parts, state).await?;
        let Some(identity) = resolve_identity(&claims) else {
            tracing::warn!(
                target: TRACING_TARGET_AUTHENTICATION,
                user_id = %claims.user_id,
                token_id = %claims.token_id,
                "session does not resolve to an identity"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Session does not describe a known account")
                .with_resource("authentication"));
        };

        let auth_state = Self(identity);
        parts.extensions.insert(auth_state);
        Ok(auth_state)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionKeys: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(None);
        }

        <Self as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

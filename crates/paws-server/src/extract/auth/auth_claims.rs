//! Signed session claims.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use paws_postgres::model::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{ErrorKind, Result};

/// Claims carried by a session token.
///
/// | Claim | Field | Description |
/// |-------|-------|-------------|
/// | `iss` | `issued_by` | Token issuer |
/// | `aud` | `audience` | Intended audience |
/// | `jti` | `token_id` | Unique token identifier |
/// | `sub` | `user_id` | Authenticated user |
/// | `role` | `role` | Role as stored at login, any letter case |
/// | `ver` | `verified` | Whether the account may write |
/// | `org` | `organization_id` | Affiliated organization, if any |
/// | `iat` | `issued_at` | Issue time, seconds since the epoch |
/// | `exp` | `expires_at` | Expiry time, seconds since the epoch |
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(rename = "iss")]
    issued_by: String,
    #[serde(rename = "aud")]
    audience: String,

    #[serde(rename = "jti")]
    pub token_id: Uuid,
    #[serde(rename = "sub")]
    pub user_id: Uuid,

    pub role: String,
    #[serde(rename = "ver")]
    pub verified: bool,
    #[serde(rename = "org", default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,

    #[serde(rename = "iat", with = "jiff::fmt::serde::timestamp::second::required")]
    pub issued_at: Timestamp,
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

impl AuthClaims {
    /// Audience of every session token.
    pub const JWT_AUDIENCE: &str = "paws:server";
    /// Issuer of every session token.
    pub const JWT_ISSUER: &str = "paws";

    /// Creates claims from explicit parts.
    pub fn new(
        user_id: Uuid,
        role: impl Into<String>,
        verified: bool,
        organization_id: Option<Uuid>,
        issued_at: Timestamp,
        expires_at: Timestamp,
    ) -> Self {
        Self {
            issued_by: Self::JWT_ISSUER.to_owned(),
            audience: Self::JWT_AUDIENCE.to_owned(),
            token_id: Uuid::new_v4(),
            user_id,
            role: role.into(),
            verified,
            organization_id,
            issued_at,
            expires_at,
        }
    }

    /// Creates claims for a user who just logged in.
    ///
    /// `verified` is passed in because organization accounts take the flag
    /// of their organization rather than their own.
    pub fn for_user(user: &User, verified: bool, ttl: SignedDuration) -> Result<Self> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.checked_add(ttl).map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %err,
                "session lifetime overflows the timestamp range"
            );
            ErrorKind::InternalServerError.into_error()
        })?;

        Ok(Self::new(
            user.id,
            user.role.to_string(),
            verified,
            user.organization_id,
            issued_at,
            expires_at,
        ))
    }

    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Timestamp::now()
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.set_audience(&[Self::JWT_AUDIENCE]);
        validation.set_issuer(&[Self::JWT_ISSUER]);
        validation.set_required_spec_claims(&["iss", "aud", "jti", "sub", "iat", "exp"]);
        validation
    }

    /// Signs the claims into a compact token.
    pub fn encode(&self, encoding_key: &EncodingKey) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), self, encoding_key).map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %err,
                user_id = %self.user_id,
                "failed to sign session token"
            );
            ErrorKind::InternalServerError
                .with_message("Session token generation failed")
                .with_resource("authentication")
        })
    }

    /// Verifies the signature and standard claims of a token.
    pub fn decode(token: &str, decoding_key: &DecodingKey) -> Result<Self> {
        let claims = decode::<Self>(token, decoding_key, &Self::validation())?.claims;

        // `exp` is validated with leeway; sessions end exactly at expiry.
        if claims.is_expired() {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                token_id = %claims.token_id,
                user_id = %claims.user_id,
                "session token expired"
            );
            return Err(ErrorKind::Unauthorized
                .with_message("Your session has expired")
                .with_resource("authentication"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn claims(lifetime: SignedDuration) -> AuthClaims {
        let issued_at = Timestamp::now();
        AuthClaims::new(
            Uuid::new_v4(),
            "organization",
            true,
            Some(Uuid::new_v4()),
            issued_at,
            issued_at + lifetime,
        )
    }

    #[test]
    fn encode_then_decode() {
        let claims = claims(SignedDuration::from_hours(1));
        let token = claims.encode(&EncodingKey::from_secret(SECRET)).unwrap();
        let decoded = AuthClaims::decode(&token, &DecodingKey::from_secret(SECRET)).unwrap();

        assert_eq!(decoded.user_id, claims.user_id);
        assert_eq!(decoded.role, "organization");
        assert_eq!(decoded.organization_id, claims.organization_id);
        assert_eq!(decoded.expires_at.as_second(), claims.expires_at.as_second());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = claims(SignedDuration::from_hours(1))
            .encode(&EncodingKey::from_secret(SECRET))
            .unwrap();
        let other = DecodingKey::from_secret(b"another-secret-another-secret-xx");

        let error = AuthClaims::decode(&token, &other).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = claims(SignedDuration::from_hours(-2))
            .encode(&EncodingKey::from_secret(SECRET))
            .unwrap();

        let error = AuthClaims::decode(&token, &DecodingKey::from_secret(SECRET)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn garbage_is_malformed() {
        let error =
            AuthClaims::decode("not.a.token", &DecodingKey::from_secret(SECRET)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedAuthToken);
    }
}

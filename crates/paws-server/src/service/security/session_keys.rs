//! Symmetric signing keys for session tokens.

use std::fmt;
use std::sync::Arc;

use jiff::SignedDuration;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::{Error, Result};

const TRACING_TARGET: &str = "paws_server::service::session_keys";

/// Minimum length of the session secret in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// HS256 keys derived from the session secret, plus the session lifetime.
///
/// Cloning is cheap: all clones share the same key material.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: SignedDuration,
}

impl SessionKeys {
    /// Derives the keys from a shared secret.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the secret is shorter than
    /// [`MIN_SECRET_LEN`] bytes or the lifetime is not positive.
    pub fn new(secret: &str, ttl: SignedDuration) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }

        if !ttl.is_positive() {
            return Err(Error::config("SESSION_TTL_SECS must be greater than 0"));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            ttl_secs = ttl.as_secs(),
            "session keys derived"
        );

        Ok(Self {
            inner: Arc::new(SessionKeysInner {
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
                ttl,
            }),
        })
    }

    /// Key used to sign session tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Key used to verify session tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Lifetime of newly issued sessions.
    #[inline]
    pub fn ttl(&self) -> SignedDuration {
        self.inner.ttl
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.inner.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const SECRET: &str = "a-test-secret-that-is-long-enough-for-hs256";

    #[test]
    fn rejects_short_secret() {
        let error = SessionKeys::new("short", SignedDuration::from_hours(1)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
        assert!(error.message().contains("SESSION_SECRET"));
    }

    #[test]
    fn rejects_non_positive_ttl() {
        let error = SessionKeys::new(SECRET, SignedDuration::ZERO).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[test]
    fn debug_hides_key_material() -> anyhow::Result<()> {
        let keys = SessionKeys::new(SECRET, SignedDuration::from_hours(1))?;
        let debug = format!("{keys:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(SECRET));
        Ok(())
    }
}

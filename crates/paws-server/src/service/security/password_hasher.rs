//! Argon2id password hashing for accounts and pending registrations.
//!
//! Hashing and verification return handler errors, so handlers can use
//! them with `?` directly.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};

use crate::handler::{ErrorKind, Result};

const TRACING_TARGET: &str = "paws_server::service::password_hasher";

/// Hashed in place of a real account when the email is unknown.
const DUMMY_PASSWORD: &str = "paws-dummy-password-for-timing";

/// Password hashing service using Argon2id with default parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a new [`PasswordHasher`].
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Returns a PHC string that can be stored as is.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password hashing failed"
                );

                ErrorKind::InternalServerError
                    .with_message("Password processing failed")
                    .with_context("Hash generation error")
                    .with_resource("authentication")
            })?;

        Ok(password_hash.to_string())
    }

    /// Verifies a password against a stored PHC hash.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` for a wrong password.
    /// - `InternalServerError` for a malformed stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %e,
                "stored password hash is malformed"
            );

            ErrorKind::InternalServerError
                .with_message("Authentication temporarily unavailable")
                .with_context("Hash format error")
                .with_resource("authentication")
        })?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => {
                tracing::debug!(target: TRACING_TARGET, "password verification failed");

                Err(ErrorKind::Unauthorized
                    .with_message("Invalid email or password")
                    .with_resource("authentication"))
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "password verification system error"
                );

                Err(ErrorKind::InternalServerError
                    .with_message("Authentication temporarily unavailable")
                    .with_context("Verification error")
                    .with_resource("authentication"))
            }
        }
    }

    /// Performs a full hash and verification that always fails.
    ///
    /// Used when no account matches the email, so the response takes about
    /// as long as a wrong password would.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        if let Ok(dummy_hash) = self.hash_password(DUMMY_PASSWORD) {
            let _ = self.verify_password(password, &dummy_hash);
        }

        false
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("correct horse battery staple")?;

        assert!(hash.starts_with("$argon2id$"));
        assert!(
            hasher
                .verify_password("correct horse battery staple", &hash)
                .is_ok()
        );
        Ok(())
    }

    #[test]
    fn hash_produces_unique_salts() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let first = hasher.hash_password("same password")?;
        let second = hasher.hash_password("same password")?;

        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("right")?;

        let error = hasher.verify_password("wrong", &hash).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[test]
    fn malformed_hash_is_internal_error() {
        let hasher = PasswordHasher::new();
        let error = hasher.verify_password("anything", "not-a-phc-string").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn dummy_verification_always_fails() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_dummy_password(DUMMY_PASSWORD));
        assert!(!hasher.verify_dummy_password("other"));
    }
}

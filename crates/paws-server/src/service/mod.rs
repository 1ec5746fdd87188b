//! Application state and dependency injection.

mod config;
mod security;

use paws_opendal::StorageBackend;
use paws_postgres::{MigrationResult, PgClient, run_pending_migrations};

pub use crate::service::config::{
    DEFAULT_RATE_LIMIT_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS, DEFAULT_SESSION_TTL_SECS,
    ServiceConfig,
};
pub use crate::service::security::{
    MIN_SECRET_LEN, PasswordHasher, RateLimitKey, RateLimiter, SessionKeys,
};
use crate::{Error, Result, TRACING_TARGET_SERVICE};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub pg_client: PgClient,
    pub storage: StorageBackend,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
    pub rate_limiter: RateLimiter,
}

impl ServiceState {
    /// Validates the configuration and assembles the state.
    ///
    /// Performs no I/O: the database pool connects lazily. Call
    /// [`run_migrations`](Self::run_migrations) before serving traffic.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let service_state = Self {
            pg_client: config.connect_postgres()?,
            storage: config.create_storage()?,

            password_hasher: PasswordHasher::new(),
            session_keys: config.load_session_keys()?,
            rate_limiter: config.create_rate_limiter(),
        };

        tracing::info!(target: TRACING_TARGET_SERVICE, "service state initialized");
        Ok(service_state)
    }

    /// Applies pending database migrations.
    pub async fn run_migrations(&self) -> Result<MigrationResult> {
        let result = run_pending_migrations(&self.pg_client).await.map_err(|e| {
            Error::external("postgres", "Failed to apply database migrations").with_source(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            applied = result.applied_versions.len(),
            duration_ms = result.duration.as_millis() as u64,
            "database schema is up to date"
        );

        Ok(result)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(pg_client: PgClient);
impl_di!(storage: StorageBackend);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
impl_di!(rate_limiter: RateLimiter);

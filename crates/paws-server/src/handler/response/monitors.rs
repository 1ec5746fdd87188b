//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Health of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// System monitoring status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Overall system health status.
    pub status: ServiceStatus,
    /// Whether the database answered.
    pub database: ServiceStatus,
    /// Application version.
    pub version: String,
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
}

impl MonitorStatus {
    /// The service is healthy exactly when the database is.
    pub fn new(database_healthy: bool) -> Self {
        let database = if database_healthy {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        Self {
            status: database,
            database,
            version: env!("CARGO_PKG_VERSION").to_owned(),
            checked_at: Timestamp::now(),
        }
    }

    #[inline]
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

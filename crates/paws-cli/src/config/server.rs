//! HTTP listener configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;

use crate::TRACING_TARGET_CONFIG;

/// Longest accepted request or shutdown timeout, in seconds.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Network binding and lifecycle of the HTTP listener.
///
/// # Environment Variables
///
/// - `HOST` - address to bind (default: 127.0.0.1)
/// - `PORT` - port to listen on (default: 3000, valid range: 1024-65535)
/// - `REQUEST_TIMEOUT` - per-request timeout in seconds (default: 30, max: 300)
/// - `SHUTDOWN_TIMEOUT` - graceful shutdown budget in seconds (default: 30, max: 300)
///
/// ```bash
/// paws --host 0.0.0.0 --port 8080
/// HOST=0.0.0.0 PORT=8080 paws
/// ```
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// TCP port to listen on (1024-65535)
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds a request may take before it is answered with an error
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    /// Checks the port and both timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error naming the option that is out of range.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.port < 1024 {
            return Err(anyhow!(
                "PORT {} is below 1024. Use ports 1024-65535 to avoid requiring root privileges.",
                self.port
            ));
        }

        if self.request_timeout == 0 || self.request_timeout > MAX_TIMEOUT_SECS {
            return Err(anyhow!(
                "REQUEST_TIMEOUT {} is invalid. Must be between 1 and {MAX_TIMEOUT_SECS} seconds.",
                self.request_timeout
            ));
        }

        if self.shutdown_timeout == 0 || self.shutdown_timeout > MAX_TIMEOUT_SECS {
            return Err(anyhow!(
                "SHUTDOWN_TIMEOUT {} is invalid. Must be between 1 and {MAX_TIMEOUT_SECS} seconds.",
                self.shutdown_timeout
            ));
        }

        Ok(())
    }

    /// Returns the socket address to bind.
    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns whether the host is `0.0.0.0` or `::`.
    #[must_use]
    pub const fn binds_to_all_interfaces(&self) -> bool {
        match self.host {
            IpAddr::V4(addr) => addr.is_unspecified(),
            IpAddr::V6(addr) => addr.is_unspecified(),
        }
    }

    /// Logs the listener settings.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            host = %self.host,
            port = self.port,
            request_timeout_secs = self.request_timeout,
            shutdown_timeout_secs = self.shutdown_timeout,
            "server configuration"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            request_timeout: 30,
            shutdown_timeout: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.binds_to_all_interfaces());
    }

    #[test]
    fn rejects_privileged_ports() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_timeouts() {
        let mut config = ServerConfig::default();

        config.request_timeout = 0;
        assert!(config.validate().is_err());

        config.request_timeout = MAX_TIMEOUT_SECS + 1;
        assert!(config.validate().is_err());

        config.request_timeout = 60;
        config.shutdown_timeout = 0;
        assert!(config.validate().is_err());

        config.shutdown_timeout = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unspecified_hosts_bind_everywhere() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            ..ServerConfig::default()
        };
        assert!(config.binds_to_all_interfaces());
        assert_eq!(config.server_addr().port(), 3000);
    }
}

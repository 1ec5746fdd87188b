//! Listener errors.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result type for listener operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Failure to bind or run the HTTP listener.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener address could not be bound.
    #[error("failed to bind to {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    pub fn bind(address: SocketAddr, source: io::Error) -> Self {
        Self::Bind { address, source }
    }

    fn io_error(&self) -> &io::Error {
        match self {
            Self::Bind { source, .. } => source,
            Self::Runtime(source) => source,
        }
    }

    /// Returns a hint for the operator, if the cause is a common one.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.io_error().kind() {
            io::ErrorKind::PermissionDenied => {
                Some("Use a port above 1024 or run with the required privileges")
            }
            io::ErrorKind::AddrInUse => {
                Some("The port is already in use. Pick another PORT or stop the other service")
            }
            io::ErrorKind::AddrNotAvailable => {
                Some("The address is not available. Check HOST against the network interfaces")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, SocketAddrV4};

    use super::*;

    #[test]
    fn busy_ports_come_with_a_suggestion() {
        let address = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));
        let error = ServerError::bind(address, io::Error::from(io::ErrorKind::AddrInUse));

        assert!(error.to_string().contains("127.0.0.1:3000"));
        assert!(error.suggestion().is_some_and(|hint| hint.contains("PORT")));
    }

    #[test]
    fn unexpected_failures_have_no_suggestion() {
        let error = ServerError::Runtime(io::Error::other("connection reset"));
        assert!(error.suggestion().is_none());
    }
}

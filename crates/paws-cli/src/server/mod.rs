//! HTTP listener startup and graceful shutdown.

mod error;
mod lifecycle;
mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

pub use self::error::{ServerError, ServerResult};
use self::lifecycle::serve_with_shutdown;
use self::shutdown::{shutdown_signal, with_deadline};
use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until a shutdown signal.
///
/// In-flight requests get [`ServerConfig::shutdown_timeout`] to finish
/// after the signal.
///
/// Client addresses are exposed to handlers through
/// [`ConnectInfo`](axum::extract::ConnectInfo), which the rate limiter keys
/// on.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
/// while running.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    let server_addr = config.server_addr();

    let listener = TcpListener::bind(server_addr)
        .await
        .map_err(|source| ServerError::bind(server_addr, source))?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "listening for connections"
    );

    let (trigger, deadline) = with_deadline(shutdown_signal(), config.shutdown_timeout());
    serve_with_shutdown(&config, || async move {
        let server = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(trigger);

        tokio::select! {
            result = server.into_future() => result,
            () = deadline => Ok(()),
        }
    })
    .await
}

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use paws_server::prelude::*;

use crate::config::{Cli, MiddlewareConfig, ServerConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "paws_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "paws_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "paws_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting paws server"
    );

    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service).context("failed to create service state")?;
    let _applied = state
        .run_migrations()
        .await
        .context("failed to migrate the database")?;

    let router = create_router(state, &cli.middleware, &cli.server);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// The last layer added is the outermost:
/// 1. Error handling: panics and timeouts become JSON errors
/// 2. Observability: request ids, tracing spans, header redaction
/// 3. Security: body limits, CORS, hardening headers
/// 4. Routes
fn create_router(
    state: ServiceState,
    middleware: &MiddlewareConfig,
    server: &ServerConfig,
) -> Router {
    routes(state.clone())
        .with_state(state)
        .with_security_layer(&middleware.cors)
        .with_observability_layer()
        .with_error_handling_layer(server.request_timeout())
}

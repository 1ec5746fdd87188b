//! HTTP middleware configuration.
//!
//! ```bash
//! paws --cors-origins "https://paws.example" --cors-max-age 600
//! ```

use clap::Args;
use paws_server::middleware::CorsConfig;

use crate::TRACING_TARGET_CONFIG;

/// Middleware settings applied around the API router.
#[derive(Debug, Clone, Args)]
pub struct MiddlewareConfig {
    /// Cross-origin resource sharing.
    #[clap(flatten)]
    pub cors: CorsConfig,
}

impl MiddlewareConfig {
    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            max_age_secs = self.cors.max_age_seconds,
            credentials = self.cors.allow_credentials,
            "CORS configuration"
        );
    }
}

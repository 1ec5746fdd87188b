//! Health check handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use paws_postgres::PgClient;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::MonitorStatus;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "paws_server::handler::monitors";

/// Reports whether the service can reach its database.
///
/// Answers `503` with the same body when it cannot.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let database_healthy = match pg_client.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err,
                "database health check failed"
            );
            false
        }
    };

    let response = MonitorStatus::new(database_healthy);
    let status_code = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok((status_code, Json(response)))
}

/// Returns the monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

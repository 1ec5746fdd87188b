//! IP-based rate limiting middleware.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::service::{RateLimitKey, RateLimiter};

/// Rate limits requests by client address.
///
/// Applied to login, registration and upload routes. The address comes
/// from [`ConnectInfo`], so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`; without it every
/// request shares one bucket.
///
/// ```rust,ignore
/// use axum::middleware::from_fn_with_state;
/// use paws_server::middleware::rate_limit_by_ip;
///
/// let layer = from_fn_with_state(state.rate_limiter.clone(), rate_limit_by_ip);
/// ```
pub async fn rate_limit_by_ip(
    State(rate_limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let ip_address = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match rate_limiter.check(RateLimitKey::from(ip_address)).await {
        Ok(()) => next.run(request).await,
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::post;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn rejects_over_budget_requests() -> anyhow::Result<()> {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let router = Router::new()
            .route("/login", post(|| async { StatusCode::NO_CONTENT }))
            .layer(from_fn_with_state(limiter, rate_limit_by_ip));
        let server = TestServer::new(router)?;

        server.post("/login").await.assert_status(StatusCode::NO_CONTENT);
        server.post("/login").await.assert_status(StatusCode::NO_CONTENT);
        server
            .post("/login")
            .await
            .assert_status(StatusCode::TOO_MANY_REQUESTS);

        Ok(())
    }
}

//! Extension trait for `axum::Router` to apply middleware stacks.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::http::header;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::error_handling::{catch_panic, handle_error};
use crate::middleware::observability::{
    create_propagate_request_id_layer, create_request_id_layer, create_sensitive_headers_layer,
    create_trace_layer,
};
use crate::middleware::security::{
    CorsConfig, DEFAULT_MAX_BODY_SIZE, MAX_UPLOAD_BODY_SIZE, create_body_limit_layer,
    create_cors_layer,
};

/// Extension trait for `axum::`[`Router`] for layering middleware.
pub trait RouterExt<S> {
    /// Layers [`HandleError`], [`CatchPanic`] and [`Timeout`] middlewares.
    ///
    /// Timeouts and panics become `500` JSON error responses.
    ///
    /// [`HandleError`]: axum::error_handling::HandleErrorLayer
    /// [`CatchPanic`]: tower_http::catch_panic::CatchPanicLayer
    /// [`Timeout`]: tower::timeout::TimeoutLayer
    fn with_error_handling_layer(self, timeout: Duration) -> Self;

    /// Layers [`SetRequestId`], [`Trace`], sensitive header redaction and
    /// [`PropagateRequestId`] middlewares.
    ///
    /// [`SetRequestId`]: tower_http::request_id::SetRequestIdLayer
    /// [`Trace`]: tower_http::trace::TraceLayer
    /// [`PropagateRequestId`]: tower_http::request_id::PropagateRequestIdLayer
    fn with_observability_layer(self) -> Self;

    /// Layers CORS, hardening response headers and the request body limit.
    fn with_security_layer(self, cors_config: &CorsConfig) -> Self;
}

impl<S> RouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_error_handling_layer(self, timeout: Duration) -> Self {
        let middlewares = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .layer(CatchPanicLayer::custom(catch_panic))
            .layer(TimeoutLayer::new(timeout));

        self.layer(middlewares)
    }

    fn with_observability_layer(self) -> Self {
        // Last layer wraps first.
        self.layer(create_propagate_request_id_layer())
            .layer(create_sensitive_headers_layer())
            .layer(create_trace_layer())
            .layer(create_request_id_layer())
    }

    fn with_security_layer(self, cors_config: &CorsConfig) -> Self {
        // Upload routes raise the extractor limit up to the hard limit.
        self.layer(DefaultBodyLimit::max(DEFAULT_MAX_BODY_SIZE))
            .layer(create_body_limit_layer(MAX_UPLOAD_BODY_SIZE))
            .layer(create_cors_layer(cors_config))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn layers_compose_on_a_router() -> anyhow::Result<()> {
        let router = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .with_security_layer(&CorsConfig::default())
            .with_observability_layer()
            .with_error_handling_layer(Duration::from_secs(5));
        let server = TestServer::new(router)?;

        let response = server.get("/ping").await;
        response.assert_status(StatusCode::OK);
        response.assert_text("pong");
        assert_eq!(response.header("x-content-type-options"), "nosniff");
        assert!(response.maybe_header("x-request-id").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn slow_handlers_time_out() -> anyhow::Result<()> {
        let router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "late"
                }),
            )
            .with_error_handling_layer(Duration::from_millis(20));
        let server = TestServer::new(router)?;

        server
            .get("/slow")
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}

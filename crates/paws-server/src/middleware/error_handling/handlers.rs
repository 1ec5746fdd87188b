use std::future::ready;

use axum::response::{IntoResponse, Response};
use futures::future::{BoxFuture, FutureExt};
use tower::timeout::error::Elapsed;

use super::TRACING_TARGET;
use crate::handler::ErrorKind;

/// Answers errors raised by the tower layers wrapped around the router.
///
/// Only timeouts get their own message. Everything else is logged and
/// reported as a plain internal error.
pub fn handle_error(err: tower::BoxError) -> BoxFuture<'static, Response> {
    let error = if err.is::<Elapsed>() {
        tracing::warn!(target: TRACING_TARGET, "request exceeded REQUEST_TIMEOUT");
        ErrorKind::InternalServerError
            .with_message("The request timed out")
            .with_context("Processing took longer than the configured request timeout")
    } else {
        tracing::error!(target: TRACING_TARGET, error = %err, "middleware failed");
        ErrorKind::InternalServerError.into_error()
    };

    ready(error.into_response()).boxed()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn timeouts_answer_with_internal_error() {
        let response = handle_error(Box::new(Elapsed::new())).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn other_layer_errors_answer_with_internal_error() {
        let source = std::io::Error::other("storage unreachable");
        let response = handle_error(Box::new(source)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

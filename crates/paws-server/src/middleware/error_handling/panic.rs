use std::any::Any;

use axum::response::{IntoResponse, Response};

use super::TRACING_TARGET;
use crate::handler::ErrorKind;

/// Turns a caught handler panic into a `500` without leaking its payload.
pub fn catch_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match payload.downcast::<String>() {
        Ok(text) => *text,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map_or_else(|| "non-string panic payload".to_owned(), |text| (*text).to_owned()),
    };

    tracing::error!(target: TRACING_TARGET, panic = %detail, "handler panicked");
    ErrorKind::InternalServerError.into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn panics_answer_with_internal_error() {
        let response = catch_panic(Box::new("animal row vanished"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = catch_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

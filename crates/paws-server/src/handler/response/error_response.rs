//! Error response body.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of every error response.
///
/// The status code travels alongside but is not serialized.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// Stable snake_case identifier, e.g. `not_found`.
    pub name: Cow<'a, str>,
    pub message: Cow<'a, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Which field or rule failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request body or query is invalid",
        StatusCode::BAD_REQUEST,
    );
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "The request conflicts with an existing record",
        StatusCode::CONFLICT,
    );
    pub const FORBIDDEN: Self = Self::new(
        "forbidden",
        "You are not allowed to perform this action",
        StatusCode::FORBIDDEN,
    );
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "The upload is larger than the configured limit",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Something went wrong on our side",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "The bearer token could not be verified",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "Sign in to continue",
        StatusCode::UNAUTHORIZED,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "A route parameter is missing or invalid",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "Nothing was found at this address",
        StatusCode::NOT_FOUND,
    );
    pub const NOT_IMPLEMENTED: Self = Self::new(
        "not_implemented",
        "This endpoint is not available",
        StatusCode::NOT_IMPLEMENTED,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "A backing service is unavailable, retry shortly",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    pub const TOO_MANY_REQUESTS: Self = Self::new(
        "too_many_requests",
        "Rate limit exceeded, retry later",
        StatusCode::TOO_MANY_REQUESTS,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "Authentication failed",
        StatusCode::UNAUTHORIZED,
    );

    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Sets the resource, joining nested resources with `/`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let resource = resource.into();
        self.resource = Some(match self.resource.take() {
            Some(parent) => Cow::Owned(format!("{parent}/{resource}")),
            None => resource,
        });
        self
    }

    /// Replaces the default message of the status.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Adds context, joining repeated calls with `; `.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(earlier) => Cow::Owned(format!("{earlier}; {context}")),
            None => context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_resources_and_context_accumulate() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("organization")
            .with_resource("animal")
            .with_context("species: required")
            .with_context("age: negative");

        assert_eq!(response.resource.as_deref(), Some("organization/animal"));
        assert_eq!(
            response.context.as_deref(),
            Some("species: required; age: negative")
        );
    }

    #[test]
    fn custom_message_replaces_the_default() {
        let response = ErrorResponse::FORBIDDEN.with_message("Organization is not verified");
        assert_eq!(response.message, "Organization is not verified");
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn status_is_not_part_of_the_body() {
        let response = ErrorResponse::BAD_REQUEST
            .with_resource("animal")
            .with_context("name: length");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["name"], "bad_request");
        assert_eq!(json["resource"], "animal");
        assert_eq!(json["context"], "name: length");
        assert!(json.get("status").is_none());
        assert_eq!(
            ErrorResponse::CONFLICT.into_response().status(),
            StatusCode::CONFLICT
        );
    }
}

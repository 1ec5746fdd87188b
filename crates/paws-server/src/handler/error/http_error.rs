//! Request-time errors returned by handlers and extractors.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Error returned by handlers, extractors and middleware.
///
/// The [`ErrorKind`] fixes the status code and the default body; message,
/// resource and context override or extend it.
#[derive(Debug, Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl Error<'static> {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
            context: None,
        }
    }
}

impl<'a> Error<'a> {
    /// Adds detail shown to the client.
    ///
    /// Never put driver or storage error text here.
    #[inline]
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Replaces the default message of the kind.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Names the resource the error is about, e.g. `animal`.
    #[inline]
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Renders the JSON body this error answers with.
    pub fn to_response(&self) -> ErrorResponse<'a> {
        let mut response = self.kind.response();
        if let Some(message) = self.message.clone() {
            response = response.with_message(message);
        }
        if let Some(resource) = self.resource.clone() {
            response = response.with_resource(resource);
        }
        if let Some(context) = self.context.clone() {
            response = response.with_context(context);
        }
        response
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.to_response();
        write!(f, "{} ({}): {}", response.name, response.status.as_u16(), response.message)?;

        if let Some(resource) = self.resource() {
            write!(f, " [{resource}]")?;
        }
        if let Some(context) = self.context() {
            write!(f, ": {context}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result type of handlers and extractors.
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Kinds of handler errors, each tied to one status code.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A route parameter failed to parse.
    MissingPathParam,
    BadRequest,
    /// No bearer token on a protected route.
    MissingAuthToken,
    /// The bearer token failed to decode or verify.
    MalformedAuthToken,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    /// An upload over the configured size limit.
    PayloadTooLarge,
    TooManyRequests,

    #[default]
    InternalServerError,
    NotImplemented,
    /// Postgres or object storage could not be reached.
    ServiceUnavailable,
}

impl ErrorKind {
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Default body for this kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::MissingPathParam => ErrorResponse::MISSING_PATH_PARAM,
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN,
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::Forbidden => ErrorResponse::FORBIDDEN,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::PayloadTooLarge => ErrorResponse::PAYLOAD_TOO_LARGE,
            Self::TooManyRequests => ErrorResponse::TOO_MANY_REQUESTS,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
            Self::NotImplemented => ErrorResponse::NOT_IMPLEMENTED,
            Self::ServiceUnavailable => ErrorResponse::SERVICE_UNAVAILABLE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_fields_override_the_kind_defaults() {
        let error = ErrorKind::Conflict
            .with_message("A story with this slug already exists")
            .with_resource("volunteer_story")
            .with_context("Slug: first-rescue");

        let response = error.to_response();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.message, "A story with this slug already exists");
        assert_eq!(response.resource.as_deref(), Some("volunteer_story"));
        assert_eq!(response.context.as_deref(), Some("Slug: first-rescue"));
    }

    #[test]
    fn display_names_status_and_resource() {
        let error = ErrorKind::NotFound
            .with_message("Animal not found")
            .with_resource("animal");

        let display = error.to_string();
        assert!(display.contains("404"));
        assert!(display.contains("Animal not found"));
        assert!(display.contains("[animal]"));
    }

    #[test]
    fn kinds_map_to_client_and_server_statuses() {
        let client = [
            (ErrorKind::BadRequest, StatusCode::BAD_REQUEST),
            (ErrorKind::MissingPathParam, StatusCode::BAD_REQUEST),
            (ErrorKind::MissingAuthToken, StatusCode::UNAUTHORIZED),
            (ErrorKind::MalformedAuthToken, StatusCode::UNAUTHORIZED),
            (ErrorKind::Unauthorized, StatusCode::UNAUTHORIZED),
            (ErrorKind::Forbidden, StatusCode::FORBIDDEN),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::Conflict, StatusCode::CONFLICT),
            (ErrorKind::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (ErrorKind::TooManyRequests, StatusCode::TOO_MANY_REQUESTS),
        ];
        let server = [
            (ErrorKind::InternalServerError, StatusCode::INTERNAL_SERVER_ERROR),
            (ErrorKind::NotImplemented, StatusCode::NOT_IMPLEMENTED),
            (ErrorKind::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (kind, status) in client.into_iter().chain(server) {
            assert_eq!(kind.status_code(), status, "{kind:?}");
            assert_eq!(kind.into_response().status(), status);
        }
    }
}

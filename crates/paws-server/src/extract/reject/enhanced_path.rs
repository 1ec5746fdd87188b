//! Path parameter extractor rejecting with [`Error`].

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use super::truncate_detail;
use crate::handler::{Error, ErrorKind};

/// Path parameters, e.g. `Path(AnimalPathParams { animal_id })`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let extractor =
            <AxumPath<T> as FromRequestParts<S>>::from_request_parts(parts, state).await;
        extractor.map(|x| Self(x.0)).map_err(Into::into)
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let message = err.body_text();
                let hint = if message.to_lowercase().contains("uuid") {
                    "Identifiers must be UUIDs"
                } else {
                    "Check the parameter format"
                };

                ErrorKind::BadRequest
                    .with_message("Invalid path parameter format")
                    .with_context(format!("{}. {}", truncate_detail(&message), hint))
            }
            PathRejection::MissingPathParams(err) => ErrorKind::MissingPathParam
                .with_message("Required path parameter missing")
                .with_context(truncate_detail(&err.body_text())),
            _ => ErrorKind::InternalServerError.with_message("Path processing failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::routing::get;
    use axum_test::TestServer;
    use uuid::Uuid;

    use super::*;

    async fn echo(Path(id): Path<Uuid>) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn invalid_uuid_is_bad_request() -> anyhow::Result<()> {
        let server = TestServer::new(Router::new().route("/animals/{id}", get(echo)))?;

        let response = server.get("/animals/not-a-uuid").await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["name"], "bad_request");

        let id = Uuid::new_v4();
        server
            .get(&format!("/animals/{id}"))
            .await
            .assert_text(id.to_string());
        Ok(())
    }
}

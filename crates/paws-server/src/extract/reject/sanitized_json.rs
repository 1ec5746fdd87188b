//! JSON extractor for update payloads that drops protected fields.
//!
//! Clients may echo a full resource back in a `PATCH` body. Identifiers,
//! ownership anchors and verification flags are never writable through an
//! update, so they are removed from the JSON object before it is
//! deserialized, whatever the authorization outcome.

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use super::Json;
use crate::TRACING_TARGET_VALIDATION;
use crate::handler::{Error, ErrorKind};

/// Keys removed from every update payload.
pub const PROTECTED_FIELDS: &[&str] = &[
    "id",
    "registrationNumber",
    "verified",
    "createdById",
    "volunteerId",
    "organizationId",
    "userId",
    "createdAt",
    "updatedAt",
];

/// The protected keys a request carried, kept aside for routes that
/// address the target through the body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtectedFields(Map<String, Value>);

impl ProtectedFields {
    /// Returns the `id` the client sent, if it is a UUID.
    pub fn id(&self) -> Option<Uuid> {
        self.0
            .get("id")
            .and_then(Value::as_str)
            .and_then(|id| Uuid::parse_str(id).ok())
    }

    /// Returns the `id` or a 400 naming the missing field.
    pub fn require_id(&self) -> Result<Uuid, Error<'static>> {
        self.id().ok_or_else(|| {
            ErrorKind::BadRequest
                .with_message("Field 'id' is required")
                .with_resource("request")
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Removes [`PROTECTED_FIELDS`] from a JSON object.
pub(crate) fn strip_protected(value: &mut Value) -> ProtectedFields {
    let mut stripped = Map::new();
    if let Value::Object(object) = value {
        for key in PROTECTED_FIELDS {
            if let Some(removed) = object.remove(*key) {
                stripped.insert((*key).to_owned(), removed);
            }
        }
    }

    ProtectedFields(stripped)
}

/// Update payload with protected fields removed, then validated.
#[must_use]
#[derive(Debug, Clone)]
pub struct SanitizedJson<T>(pub T, pub ProtectedFields);

impl<T, S> FromRequest<S> for SanitizedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = <Json<Value> as FromRequest<S>>::from_request(req, state).await?;

        if !value.is_object() {
            return Err(ErrorKind::BadRequest
                .with_message("Request body must be a JSON object")
                .with_resource("request"));
        }

        let protected = strip_protected(&mut value);
        if !protected.is_empty() {
            tracing::debug!(
                target: TRACING_TARGET_VALIDATION,
                stripped = ?protected.0.keys().collect::<Vec<_>>(),
                "removed protected fields from update payload"
            );
        }

        let data: T = serde_json::from_value(value).map_err(|err| {
            ErrorKind::BadRequest
                .with_message("Invalid request data format")
                .with_context(super::truncate_detail(&err.to_string()))
        })?;
        data.validate()?;

        Ok(Self(data, protected))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn protected_fields_are_removed() {
        let id = Uuid::new_v4();
        let mut body = json!({
            "id": id.to_string(),
            "name": "Shelter",
            "registrationNumber": "RN-1",
            "verified": true,
            "organizationId": Uuid::new_v4().to_string(),
        });

        let protected = strip_protected(&mut body);
        assert_eq!(body, json!({ "name": "Shelter" }));
        assert_eq!(protected.id(), Some(id));
        assert!(protected.require_id().is_ok());
    }

    #[test]
    fn missing_id_is_reported() {
        let mut body = json!({ "name": "Biscuit" });
        let protected = strip_protected(&mut body);
        assert!(protected.is_empty());
        let error = protected.require_id().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn non_objects_are_left_alone() {
        let mut body = json!(["id"]);
        assert!(strip_protected(&mut body).is_empty());
    }
}

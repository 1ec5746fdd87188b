//! Upload request types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Query parameters of the upload routes.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadQuery {
    /// Original file name; only its extension is kept.
    #[validate(length(min = 1, max = 255))]
    pub filename: Option<String>,
    /// Animal the file illustrates.
    pub animal_id: Option<Uuid>,
}

/// Request payload for `POST /api/upload/direct`.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DirectUpload {
    /// Original file name; only its extension is kept.
    #[validate(length(min = 1, max = 255))]
    pub filename: String,
    /// MIME type the client will upload.
    #[validate(length(min = 3, max = 255))]
    pub content_type: Option<String>,
    /// Size the client announces, in bytes.
    #[validate(range(min = 0))]
    pub size_bytes: Option<i64>,
    pub animal_id: Option<Uuid>,
}

/// Request payload for `POST /api/upload/delete`.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUpload {
    /// Storage key returned by the upload.
    #[validate(length(min = 1, max = 512))]
    pub file_key: String,
}

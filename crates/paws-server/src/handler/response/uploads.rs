//! Upload and media response types.

use jiff::Timestamp;
use paws_opendal::PresignedUpload;
use paws_postgres::model;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Location of an uploaded file.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    /// Public URL of the file.
    pub url: String,
    /// Storage key, used to delete the file later.
    pub file_key: String,
}

impl Upload {
    pub fn from_model(media: &model::Media) -> Self {
        Self {
            url: media.url.clone(),
            file_key: media.file_key.clone(),
        }
    }
}

/// Response of `POST /api/upload/direct`.
///
/// The client sends the file itself with `method` to `uploadUrl` along with
/// `headers`.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub url: String,
    pub file_key: String,
    pub method: String,
    pub upload_url: String,
    pub headers: Vec<(String, String)>,
    pub expires_at: Timestamp,
}

impl UploadTicket {
    pub fn new(media: &model::Media, presigned: PresignedUpload, expires_at: Timestamp) -> Self {
        Self {
            url: media.url.clone(),
            file_key: media.file_key.clone(),
            method: presigned.method,
            upload_url: presigned.url,
            headers: presigned.headers,
            expires_at,
        }
    }
}

/// Response of `POST /api/upload/delete`.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedUpload {
    pub file_key: String,
    /// `false` when the stored object could not be removed yet; the file is
    /// already hidden and will be cleaned up by reconciliation.
    pub purged: bool,
}

/// Uploaded file metadata.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: Uuid,
    pub file_key: String,
    pub url: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub user_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    pub created_at: Timestamp,
}

impl Media {
    pub fn from_model(media: model::Media) -> Self {
        Self {
            id: media.id,
            file_key: media.file_key,
            url: media.url,
            content_type: media.content_type,
            size_bytes: media.size_bytes,
            user_id: media.user_id,
            organization_id: media.organization_id,
            animal_id: media.animal_id,
            created_at: media.created_at.into(),
        }
    }

    pub fn from_models(media: Vec<model::Media>) -> MediaList {
        media.into_iter().map(Self::from_model).collect()
    }
}

/// Response for listing the caller's files.
pub type MediaList = Vec<Media>;

/// Outcome of `POST /api/upload/reconcile`.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Pending deletions and expired direct uploads examined.
    pub examined: usize,
    /// Objects and rows removed.
    pub purged: usize,
    /// Direct uploads found in storage.
    pub confirmed: usize,
    /// Direct uploads never written; their rows were removed.
    pub abandoned: usize,
    /// Rows whose storage call failed again.
    pub failed: usize,
}

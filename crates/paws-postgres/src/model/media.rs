//! Media model for PostgreSQL database operations.
//!
//! A media row is the metadata half of an uploaded file. The stored object
//! and the row are created and removed as a pair; `deleted_at` marks rows
//! whose object removal has started but not been confirmed yet.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::media;

/// Metadata for an uploaded file.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = media)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Media {
    pub id: Uuid,
    /// Object key inside the storage bucket.
    pub file_key: String,
    /// Public URL of the stored object.
    pub url: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    /// Uploading user.
    pub user_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    pub created_at: Timestamp,
    /// Set when deletion started; such rows await reconciliation.
    pub deleted_at: Option<Timestamp>,
    /// Set while a presigned direct upload is unconfirmed.
    pub upload_expires_at: Option<Timestamp>,
}

/// Data for recording a new upload.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = media)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewMedia {
    pub file_key: String,
    pub url: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub user_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    /// Only set for presigned direct uploads.
    pub upload_expires_at: Option<Timestamp>,
}

impl Media {
    /// Returns whether the row is soft-deleted and awaits object removal.
    #[inline]
    pub fn is_pending_deletion(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns whether the row belongs to a direct upload not yet seen in
    /// storage.
    #[inline]
    pub fn is_awaiting_upload(&self) -> bool {
        self.upload_expires_at.is_some()
    }
}

//! Media repository.
//!
//! Deletion is two-phase: [`MediaRepository::mark_media_deleted`] soft-deletes
//! the row before the stored object is removed, and
//! [`MediaRepository::purge_media`] drops the row once the object is gone.
//! Rows stuck in between are picked up by
//! [`MediaRepository::list_pending_media_deletions`].
//!
//! Presigned direct uploads are recorded before the client writes the
//! object. Their rows carry `upload_expires_at` until
//! [`MediaRepository::confirm_media_upload`] clears it; rows still carrying an
//! expired one are listed by [`MediaRepository::list_expired_direct_uploads`].

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{Media, NewMedia};
use crate::types::Pagination;
use crate::{PgConnection, PgError, PgResult, schema};

/// Repository for media database operations.
pub trait MediaRepository {
    /// Records a new upload.
    fn create_media(&mut self, new_media: NewMedia) -> impl Future<Output = PgResult<Media>> + Send;

    /// Finds a live or soft-deleted media row by its storage key.
    fn find_media_by_file_key(
        &mut self,
        file_key: &str,
    ) -> impl Future<Output = PgResult<Option<Media>>> + Send;

    /// Lists a user's live media, newest first.
    fn list_user_media(
        &mut self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Media>>> + Send;

    /// Soft-deletes a media row. Already soft-deleted rows are returned as is.
    fn mark_media_deleted(
        &mut self,
        media_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Media>>> + Send;

    /// Removes a media row for good. Returns whether a row was removed.
    fn purge_media(&mut self, media_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Lists soft-deleted rows whose object removal is unconfirmed, oldest first.
    fn list_pending_media_deletions(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Media>>> + Send;

    /// Lists live direct uploads whose upload URL expired before `now`
    /// without being confirmed, oldest first.
    fn list_expired_direct_uploads(
        &mut self,
        now: Timestamp,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Media>>> + Send;

    /// Marks a direct upload as present in storage.
    fn confirm_media_upload(&mut self, media_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl MediaRepository for PgConnection {
    async fn create_media(&mut self, new_media: NewMedia) -> PgResult<Media> {
        use schema::media;

        diesel::insert_into(media::table)
            .values(&new_media)
            .returning(Media::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_media_by_file_key(&mut self, file_key: &str) -> PgResult<Option<Media>> {
        use schema::media::{self, dsl};

        media::table
            .filter(dsl::file_key.eq(file_key))
            .select(Media::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_user_media(&mut self, user_id: Uuid, pagination: Pagination) -> PgResult<Vec<Media>> {
        use schema::media::{self, dsl};

        media::table
            .filter(dsl::user_id.eq(user_id))
            .filter(dsl::deleted_at.is_null())
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Media::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn mark_media_deleted(&mut self, media_id: Uuid) -> PgResult<Option<Media>> {
        use schema::media::{self, dsl};

        let now = jiff_diesel::Timestamp::from(Timestamp::now());
        let marked = diesel::update(
            media::table
                .filter(dsl::id.eq(media_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set(dsl::deleted_at.eq(Some(now)))
        .returning(Media::as_returning())
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)?;

        if marked.is_some() {
            return Ok(marked);
        }

        media::table
            .filter(dsl::id.eq(media_id))
            .select(Media::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn purge_media(&mut self, media_id: Uuid) -> PgResult<bool> {
        use schema::media::{self, dsl};

        let deleted = diesel::delete(media::table.filter(dsl::id.eq(media_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }

    async fn list_pending_media_deletions(&mut self, pagination: Pagination) -> PgResult<Vec<Media>> {
        use schema::media::{self, dsl};

        media::table
            .filter(dsl::deleted_at.is_not_null())
            .order(dsl::deleted_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Media::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn list_expired_direct_uploads(
        &mut self,
        now: Timestamp,
        pagination: Pagination,
    ) -> PgResult<Vec<Media>> {
        use schema::media::{self, dsl};

        let now = jiff_diesel::Timestamp::from(now);
        media::table
            .filter(dsl::deleted_at.is_null())
            .filter(dsl::upload_expires_at.lt(Some(now)))
            .order(dsl::upload_expires_at.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Media::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn confirm_media_upload(&mut self, media_id: Uuid) -> PgResult<bool> {
        use schema::media::{self, dsl};

        let updated = diesel::update(media::table.filter(dsl::id.eq(media_id)))
            .set(dsl::upload_expires_at.eq(None::<jiff_diesel::Timestamp>))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(updated > 0)
    }
}

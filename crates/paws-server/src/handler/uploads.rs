//! Upload and media handlers.
//!
//! Every stored object is paired with a `media` row. Uploads write the
//! object first and remove it again when the row cannot be written.
//! Deletes soft-delete the row, remove the object and only then drop the
//! row, so a failed object removal stays visible to reconciliation.

use std::time::Duration;

use axum::Router;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use bytes::Bytes;
use jiff::{SignedDuration, Timestamp};
use paws_opendal::StorageBackend;
use paws_postgres::PgConn;
use paws_postgres::model::{Media as MediaModel, NewMedia};
use paws_postgres::query::MediaRepository;
use paws_postgres::types::{MAX_LIMIT, Pagination as PgPagination};
use uuid::Uuid;

use super::animals::find_animal;
use crate::authz::{Action, Identity, OwnerFacts, ResourceKind, enforce};
use crate::extract::{AuthState, Json, Multipart, PgPool, Query, ValidateJson};
use crate::handler::request::{DeleteUpload, DirectUpload, Pagination, UploadQuery};
use crate::handler::response::{
    DeletedUpload, Media, MediaList, Reconciliation, Upload, UploadTicket,
};
use crate::handler::{Error, ErrorKind, Result};
use crate::middleware::{MAX_UPLOAD_BODY_SIZE, rate_limit_by_ip};
use crate::service::ServiceState;

/// Tracing target for upload operations.
const TRACING_TARGET: &str = "paws_server::handler::uploads";

/// Lifetime of a presigned upload URL.
const PRESIGN_TTL_SECS: u64 = 15 * 60;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// Longest extension kept from the original file name.
const MAX_EXTENSION_LEN: usize = 10;

/// Returns the extension to keep from a client file name.
///
/// Only short alphanumeric extensions survive; everything else is stored
/// as `bin`.
fn file_extension(filename: Option<&str>) -> String {
    filename
        .and_then(|filename| filename.rsplit_once('.'))
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .filter(|extension| {
            !extension.is_empty()
                && extension.len() <= MAX_EXTENSION_LEN
                && extension.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or_else(|| "bin".to_owned())
}

/// Builds a fresh storage key under the caller's prefix.
///
/// The client file name never becomes part of the path.
fn file_key(user_id: Uuid, filename: Option<&str>) -> String {
    format!(
        "uploads/{user_id}/{}.{}",
        Uuid::now_v7(),
        file_extension(filename)
    )
}

fn media_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Media not found")
        .with_resource("media")
}

/// Checks the caller may upload, and may attach the file to `animal_id`.
async fn authorize_upload(
    conn: &mut PgConn,
    identity: &Identity,
    animal_id: Option<Uuid>,
) -> Result<()> {
    let owner = OwnerFacts::new(
        ResourceKind::Media,
        Some(identity.user_id),
        identity.organization_id(),
    );
    enforce(Some(identity), Action::Create, &owner)?;

    if let Some(animal_id) = animal_id {
        let (_, owner) = find_animal(conn, animal_id).await?;
        enforce(Some(identity), Action::Update, &owner)?;
    }

    Ok(())
}

fn new_media(
    storage: &StorageBackend,
    identity: &Identity,
    file_key: String,
    content_type: Option<String>,
    size_bytes: i64,
    animal_id: Option<Uuid>,
) -> NewMedia {
    NewMedia {
        url: storage.public_url(&file_key),
        file_key,
        content_type,
        size_bytes,
        user_id: identity.user_id,
        organization_id: identity.organization_id(),
        animal_id,
        upload_expires_at: None,
    }
}

/// Stores the object and records it.
async fn store_upload(
    conn: &mut PgConn,
    storage: &StorageBackend,
    identity: &Identity,
    filename: Option<&str>,
    content_type: Option<String>,
    data: Bytes,
    animal_id: Option<Uuid>,
) -> Result<MediaModel> {
    if data.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("Uploaded file is empty")
            .with_resource("media"));
    }

    let file_key = file_key(identity.user_id, filename);
    let size_bytes = i64::try_from(data.len()).unwrap_or(i64::MAX);
    storage
        .write(&file_key, data, content_type.as_deref())
        .await?;

    let new_media = new_media(
        storage,
        identity,
        file_key.clone(),
        content_type,
        size_bytes,
        animal_id,
    );

    match conn.create_media(new_media).await {
        Ok(media) => {
            tracing::info!(
                target: TRACING_TARGET,
                media_id = %media.id,
                file_key = %media.file_key,
                size_bytes = media.size_bytes,
                "file uploaded"
            );
            Ok(media)
        }
        Err(err) => {
            if let Err(cleanup) = storage.delete(&file_key).await {
                tracing::error!(
                    target: TRACING_TARGET,
                    file_key = %file_key,
                    error = %cleanup,
                    "failed to remove orphaned object"
                );
            }
            Err(err.into())
        }
    }
}

/// Uploads the `file` field of a multipart form.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn upload_multipart(
    PgPool(mut conn): PgPool,
    State(storage): State<StorageBackend>,
    AuthState(identity): AuthState,
    Query(query): Query<UploadQuery>,
    Multipart(mut multipart): Multipart,
) -> Result<(StatusCode, Json<Upload>)> {
    validator::Validate::validate(&query)?;
    authorize_upload(&mut conn, &identity, query.animal_id).await?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await?;

        let media = store_upload(
            &mut conn,
            &storage,
            &identity,
            filename.as_deref(),
            content_type,
            data,
            query.animal_id,
        )
        .await?;

        return Ok((StatusCode::CREATED, Json(Upload::from_model(&media))));
    }

    Err(ErrorKind::BadRequest
        .with_message("Missing multipart field 'file'")
        .with_resource("media"))
}

/// Uploads the raw request body. The file name comes from `?filename=`.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn upload_raw(
    PgPool(mut conn): PgPool,
    State(storage): State<StorageBackend>,
    AuthState(identity): AuthState,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Upload>)> {
    validator::Validate::validate(&query)?;

    let data = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ErrorKind::PayloadTooLarge.into_error()
        } else {
            ErrorKind::BadRequest
                .with_message("Failed to read request body")
                .with_context(rejection.body_text())
        }
    })?;

    authorize_upload(&mut conn, &identity, query.animal_id).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let media = store_upload(
        &mut conn,
        &storage,
        &identity,
        query.filename.as_deref(),
        content_type,
        data,
        query.animal_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Upload::from_model(&media))))
}

/// Hands out a presigned URL the client uploads to directly.
///
/// The media row is written up front with the announced size and stays
/// unconfirmed until reconciliation finds the object. Rows whose object
/// never arrives before the URL expires are removed by reconciliation.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn upload_direct(
    PgPool(mut conn): PgPool,
    State(storage): State<StorageBackend>,
    AuthState(identity): AuthState,
    ValidateJson(request): ValidateJson<DirectUpload>,
) -> Result<(StatusCode, Json<UploadTicket>)> {
    let size_bytes = request.size_bytes.unwrap_or_default();
    if size_bytes > MAX_UPLOAD_BODY_SIZE as i64 {
        return Err(ErrorKind::PayloadTooLarge
            .with_message("File exceeds the upload size limit")
            .with_resource("media"));
    }

    authorize_upload(&mut conn, &identity, request.animal_id).await?;

    let file_key = file_key(identity.user_id, Some(&request.filename));
    let expires_in = Duration::from_secs(PRESIGN_TTL_SECS);
    let Some(presigned) = storage.presign_write(&file_key, expires_in).await? else {
        return Err(ErrorKind::NotImplemented
            .with_message("Direct uploads are not supported by the storage backend")
            .with_resource("media"));
    };

    let expires_at = Timestamp::now() + SignedDuration::from_secs(PRESIGN_TTL_SECS as i64);
    let mut new_media = new_media(
        &storage,
        &identity,
        file_key,
        request.content_type,
        size_bytes,
        request.animal_id,
    );
    new_media.upload_expires_at = Some(expires_at.into());
    let media = conn.create_media(new_media).await?;

    tracing::info!(
        target: TRACING_TARGET,
        media_id = %media.id,
        file_key = %media.file_key,
        "direct upload presigned"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadTicket::new(&media, presigned, expires_at)),
    ))
}

/// Deletes an uploaded file and its media row.
///
/// Retrying a delete that failed half way picks up where it stopped.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn delete_upload(
    PgPool(mut conn): PgPool,
    State(storage): State<StorageBackend>,
    AuthState(identity): AuthState,
    ValidateJson(request): ValidateJson<DeleteUpload>,
) -> Result<Json<DeletedUpload>> {
    let media = conn
        .find_media_by_file_key(&request.file_key)
        .await?
        .ok_or_else(media_not_found)?;
    enforce(Some(&identity), Action::Delete, &OwnerFacts::media(&media))?;

    let media = conn
        .mark_media_deleted(media.id)
        .await?
        .ok_or_else(media_not_found)?;

    let purged = match storage.delete(&media.file_key).await {
        Ok(()) => conn.purge_media(media.id).await?,
        Err(err) => {
            tracing::warn!(
                target: TRACING_TARGET,
                media_id = %media.id,
                file_key = %media.file_key,
                error = %err,
                "object removal failed, left for reconciliation"
            );
            false
        }
    };

    tracing::info!(
        target: TRACING_TARGET,
        media_id = %media.id,
        purged,
        "file deleted"
    );

    Ok(Json(DeletedUpload {
        file_key: media.file_key,
        purged,
    }))
}

/// Lists the caller's live files, newest first.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn list_media(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Query(pagination): Query<Pagination>,
) -> Result<Json<MediaList>> {
    validator::Validate::validate(&pagination)?;

    let media = conn
        .list_user_media(identity.user_id, pagination.into())
        .await?;

    Ok(Json(Media::from_models(media)))
}

/// Retries one batch of pending deletions and settles one batch of expired
/// direct uploads. Administrators only.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn reconcile_uploads(
    PgPool(mut conn): PgPool,
    State(storage): State<StorageBackend>,
    AuthState(identity): AuthState,
) -> Result<Json<Reconciliation>> {
    if !identity.is_admin() {
        return Err(ErrorKind::Forbidden
            .with_message("Only administrators can reconcile uploads")
            .with_resource("media"));
    }

    let pending = conn
        .list_pending_media_deletions(PgPagination::new(MAX_LIMIT, 0))
        .await?;

    let mut report = Reconciliation {
        examined: pending.len(),
        ..Default::default()
    };

    for media in pending {
        match storage.delete(&media.file_key).await {
            Ok(()) if conn.purge_media(media.id).await? => report.purged += 1,
            Ok(()) => {}
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    media_id = %media.id,
                    error = %err,
                    "pending deletion failed again"
                );
                report.failed += 1;
            }
        }
    }

    let expired = conn
        .list_expired_direct_uploads(Timestamp::now(), PgPagination::new(MAX_LIMIT, 0))
        .await?;
    report.examined += expired.len();

    for media in expired {
        match storage.exists(&media.file_key).await {
            Ok(true) if conn.confirm_media_upload(media.id).await? => report.confirmed += 1,
            Ok(false) if conn.purge_media(media.id).await? => report.abandoned += 1,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    media_id = %media.id,
                    error = %err,
                    "direct upload check failed"
                );
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        target: TRACING_TARGET,
        examined = report.examined,
        purged = report.purged,
        confirmed = report.confirmed,
        abandoned = report.abandoned,
        failed = report.failed,
        "uploads reconciled"
    );

    Ok(Json(report))
}

/// Returns the upload routes. All of them need a session.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let uploads = Router::new()
        .route("/api/upload", post(upload_multipart))
        .route("/api/upload/direct", post(upload_direct))
        .route("/api/upload/server-upload", post(upload_raw))
        .route_layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_SIZE))
        .route_layer(from_fn_with_state(state, rate_limit_by_ip));

    Router::new()
        .route("/api/upload/delete", post(delete_upload))
        .route("/api/upload/reconcile", post(reconcile_uploads))
        .route("/api/media", get(list_media))
        .merge(uploads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_sanitized() {
        assert_eq!(file_extension(Some("cat.PNG")), "png");
        assert_eq!(file_extension(Some("archive.tar.gz")), "gz");
        assert_eq!(file_extension(Some("no-extension")), "bin");
        assert_eq!(file_extension(Some("evil.p/h/p")), "bin");
        assert_eq!(file_extension(Some("trailing.")), "bin");
        assert_eq!(file_extension(None), "bin");
    }

    #[test]
    fn file_keys_live_under_the_user_prefix() {
        let user_id = Uuid::new_v4();
        let key = file_key(user_id, Some("../../etc/passwd.jpg"));

        assert!(key.starts_with(&format!("uploads/{user_id}/")));
        assert!(key.ends_with(".jpg"));
        assert!(!key.contains(".."));
    }
}

//! Content block handlers.
//!
//! Content blocks make up an organization's public page. Anyone may read
//! them; the organization's own accounts and administrators edit them.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use paws_postgres::PgConn;
use paws_postgres::model::ContentBlock as ContentBlockModel;
use paws_postgres::query::{ContentBlockRepository, OrganizationRepository};
use uuid::Uuid;

use crate::authz::{Action, OwnerFacts, ResourceKind, enforce};
use crate::extract::{AuthState, Json, Path, PgPool, Query, SanitizedJson, ValidateJson};
use crate::handler::request::{
    ContentBlockPathParams, CreateContentBlock, ListContentBlocksQuery, UpdateContentBlock,
};
use crate::handler::response::{ContentBlock, ContentBlocks};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for content block operations.
const TRACING_TARGET: &str = "paws_server::handler::content_blocks";

fn block_not_found(block_id: Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Content block not found")
        .with_context(format!("Content block ID: {block_id}"))
        .with_resource("content_block")
}

async fn find_block(conn: &mut PgConn, block_id: Uuid) -> Result<ContentBlockModel> {
    conn.find_content_block_by_id(block_id)
        .await?
        .ok_or_else(|| block_not_found(block_id))
}

/// Lists the blocks of an organization page in display order.
#[tracing::instrument(skip_all, fields(organization_id = %query.organization_id))]
async fn list_blocks(
    PgPool(mut conn): PgPool,
    Query(query): Query<ListContentBlocksQuery>,
) -> Result<Json<ContentBlocks>> {
    let blocks = conn
        .list_organization_content_blocks(query.organization_id)
        .await?;

    Ok(Json(ContentBlock::from_models(blocks)))
}

/// Adds a block to an organization page.
///
/// Organization accounts may omit `organizationId` and write to their own
/// page.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn create_block(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    ValidateJson(request): ValidateJson<CreateContentBlock>,
) -> Result<(StatusCode, Json<ContentBlock>)> {
    let Some(organization_id) = request.organization_id.or(identity.organization_id()) else {
        return Err(ErrorKind::BadRequest
            .with_message("Field 'organizationId' is required")
            .with_resource("content_block"));
    };

    let owner = OwnerFacts::new(ResourceKind::ContentBlock, None, Some(organization_id));
    enforce(Some(&identity), Action::Create, &owner)?;

    if conn
        .find_organization_by_id(organization_id)
        .await?
        .is_none()
    {
        return Err(ErrorKind::NotFound
            .with_message("Organization not found")
            .with_resource("organization"));
    }

    let block = conn
        .create_content_block(request.into_model(organization_id))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        block_id = %block.id,
        organization_id = %organization_id,
        "content block created"
    );

    Ok((StatusCode::CREATED, Json(ContentBlock::from_model(block))))
}

/// Edits a content block.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, block_id = %path_params.block_id))]
async fn update_block(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<ContentBlockPathParams>,
    SanitizedJson(request, _): SanitizedJson<UpdateContentBlock>,
) -> Result<Json<ContentBlock>> {
    let block_id = path_params.block_id;
    let block = find_block(&mut conn, block_id).await?;
    enforce(
        Some(&identity),
        Action::Update,
        &OwnerFacts::content_block(&block),
    )?;

    let block = conn
        .update_content_block(block_id, request.into_model())
        .await?
        .ok_or_else(|| block_not_found(block_id))?;

    tracing::info!(target: TRACING_TARGET, "content block updated");
    Ok(Json(ContentBlock::from_model(block)))
}

/// Removes a content block.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, block_id = %path_params.block_id))]
async fn delete_block(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<ContentBlockPathParams>,
) -> Result<StatusCode> {
    let block_id = path_params.block_id;
    let block = find_block(&mut conn, block_id).await?;
    enforce(
        Some(&identity),
        Action::Delete,
        &OwnerFacts::content_block(&block),
    )?;

    if !conn.delete_content_block(block_id).await? {
        return Err(block_not_found(block_id));
    }

    tracing::info!(target: TRACING_TARGET, "content block deleted");
    Ok(StatusCode::OK)
}

/// Returns the public content block routes.
pub fn public_routes() -> Router<ServiceState> {
    Router::new().route("/api/content-blocks", get(list_blocks))
}

/// Returns the content block routes that need a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/content-blocks", post(create_block))
        .route(
            "/api/content-blocks/{blockId}",
            patch(update_block).delete(delete_block),
        )
}

//! Volunteer story handlers.
//!
//! Stories are public to read. The author and administrators edit them,
//! and only administrators decide which stories are featured.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use paws_postgres::PgConn;
use paws_postgres::model::VolunteerStory;
use paws_postgres::query::VolunteerStoryRepository;
use paws_postgres::types::Pagination;
use uuid::Uuid;

use crate::authz::{Action, OwnerFacts, ResourceKind, enforce};
use crate::extract::{AuthState, Json, PgPool, Query, SanitizedJson, ValidateJson};
use crate::handler::request::{CreateStory, IdQuery, ListStoriesQuery, UpdateStory};
use crate::handler::response::{Stories, Story};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for volunteer story operations.
const TRACING_TARGET: &str = "paws_server::handler::volunteer_stories";

fn story_not_found(story_id: Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Story not found")
        .with_context(format!("Story ID: {story_id}"))
        .with_resource("volunteer_story")
}

fn slug_taken(slug: &str) -> Error<'static> {
    ErrorKind::Conflict
        .with_message("A story with this slug already exists")
        .with_context(format!("Slug: {slug}"))
        .with_resource("volunteer_story")
}

async fn find_story(conn: &mut PgConn, story_id: Uuid) -> Result<VolunteerStory> {
    conn.find_story_by_id(story_id)
        .await?
        .ok_or_else(|| story_not_found(story_id))
}

/// Lists stories, or looks one up by slug.
///
/// A slug lookup still answers with a list holding zero or one story.
#[tracing::instrument(skip_all)]
async fn list_stories(
    PgPool(mut conn): PgPool,
    Query(query): Query<ListStoriesQuery>,
) -> Result<Json<Stories>> {
    validator::Validate::validate(&query)?;

    let stories = match query.slug.as_deref() {
        Some(slug) => conn.find_story_by_slug(slug).await?.into_iter().collect(),
        None => {
            let featured_only = query.featured.unwrap_or(false);
            let pagination = Pagination::from_limit(query.limit);
            conn.list_stories(featured_only, pagination).await?
        }
    };

    Ok(Json(Story::from_models(stories)))
}

/// Publishes a story authored by the caller.
///
/// Administrators publish on behalf of the platform, without an author.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn create_story(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    ValidateJson(mut request): ValidateJson<CreateStory>,
) -> Result<(StatusCode, Json<Story>)> {
    let owner = OwnerFacts::new(
        ResourceKind::VolunteerStory,
        Some(identity.user_id),
        None,
    );
    enforce(Some(&identity), Action::Create, &owner)?;

    if conn.slug_exists(&request.slug, None).await? {
        return Err(slug_taken(&request.slug));
    }

    let volunteer_id = if identity.is_admin() {
        None
    } else {
        request.featured = None;
        Some(identity.user_id)
    };

    let story = conn.create_story(request.into_model(volunteer_id)).await?;

    tracing::info!(
        target: TRACING_TARGET,
        story_id = %story.id,
        slug = %story.slug,
        "story created"
    );

    Ok((StatusCode::CREATED, Json(Story::from_model(story))))
}

/// Edits the story whose `id` is part of the body.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn update_story(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    SanitizedJson(mut request, protected): SanitizedJson<UpdateStory>,
) -> Result<Json<Story>> {
    let story_id = protected.require_id()?;
    let story = find_story(&mut conn, story_id).await?;
    enforce(
        Some(&identity),
        Action::Update,
        &OwnerFacts::volunteer_story(&story),
    )?;

    if let Some(slug) = request.slug.as_deref()
        && conn.slug_exists(slug, Some(story_id)).await?
    {
        return Err(slug_taken(slug));
    }

    if !identity.is_admin() {
        request.featured = None;
    }

    let story = conn
        .update_story(story_id, request.into_model())
        .await?
        .ok_or_else(|| story_not_found(story_id))?;

    tracing::info!(target: TRACING_TARGET, story_id = %story.id, "story updated");
    Ok(Json(Story::from_model(story)))
}

/// Deletes the story named by `?id=`.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, story_id = %query.id))]
async fn delete_story(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode> {
    let story = find_story(&mut conn, query.id).await?;
    enforce(
        Some(&identity),
        Action::Delete,
        &OwnerFacts::volunteer_story(&story),
    )?;

    if !conn.delete_story(story.id).await? {
        return Err(story_not_found(story.id));
    }

    tracing::info!(target: TRACING_TARGET, "story deleted");
    Ok(StatusCode::OK)
}

/// Returns the public story routes.
pub fn public_routes() -> Router<ServiceState> {
    Router::new().route("/api/volunteer-stories", get(list_stories))
}

/// Returns the story routes that need a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new().route(
        "/api/volunteer-stories",
        post(create_story)
            .patch(update_story)
            .delete(delete_story),
    )
}

//! Profile handlers for the signed-in user.

use axum::Router;
use axum::routing::get;
use paws_postgres::PgConn;
use paws_postgres::model::User;
use paws_postgres::query::{OrganizationRepository, UserRepository};
use uuid::Uuid;

use crate::authz::{Action, OwnerFacts, enforce};
use crate::extract::{AuthState, Json, PgPool, SanitizedJson};
use crate::handler::request::UpdateProfile;
use crate::handler::response::{FullProfile, OrganizationSummary};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for profile operations.
const TRACING_TARGET: &str = "paws_server::handler::user_profile";

pub(super) fn user_not_found(user_id: Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("User not found")
        .with_context(format!("User ID: {user_id}"))
        .with_resource("user")
}

/// Loads the summary of the organization a user belongs to.
pub(super) async fn organization_summary(
    conn: &mut PgConn,
    user: &User,
) -> Result<Option<OrganizationSummary>> {
    let Some(organization_id) = user.organization_id else {
        return Ok(None);
    };

    let organization = conn.find_organization_by_id(organization_id).await?;
    Ok(organization.as_ref().map(OrganizationSummary::from_model))
}

/// Returns the caller's own profile.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn read_profile(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
) -> Result<Json<FullProfile>> {
    let user = conn
        .find_user_by_id(identity.user_id)
        .await?
        .ok_or_else(|| user_not_found(identity.user_id))?;

    let organization = organization_summary(&mut conn, &user).await?;
    Ok(Json(FullProfile::from_model(user, organization)))
}

/// Updates the caller's own profile.
///
/// Unverified accounts are refused like any other write.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn update_profile(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    SanitizedJson(request, _): SanitizedJson<UpdateProfile>,
) -> Result<Json<FullProfile>> {
    let current = conn
        .find_user_by_id(identity.user_id)
        .await?
        .ok_or_else(|| user_not_found(identity.user_id))?;
    enforce(
        Some(&identity),
        Action::Update,
        &OwnerFacts::user_profile(&current),
    )?;

    let user = conn
        .update_user(identity.user_id, request.into_model())
        .await?
        .ok_or_else(|| user_not_found(identity.user_id))?;

    tracing::info!(target: TRACING_TARGET, "profile updated");

    let organization = organization_summary(&mut conn, &user).await?;
    Ok(Json(FullProfile::from_model(user, organization)))
}

/// Returns the profile routes. All of them need a session.
pub fn routes() -> Router<ServiceState> {
    Router::new().route(
        "/api/user/profile",
        get(read_profile).patch(update_profile),
    )
}

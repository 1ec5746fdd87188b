//! Volunteer profile handlers.
//!
//! Profiles are shaped per viewer: the volunteer and administrators see
//! every field, everyone else the public subset. Private profiles are
//! additionally anonymized.

use std::collections::HashMap;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch};
use paws_postgres::PgConn;
use paws_postgres::model::User;
use paws_postgres::query::{OrganizationRepository, UserRepository};
use paws_postgres::types::UserRole;
use uuid::Uuid;

use super::user_profile::organization_summary;
use crate::authz::{Action, Actor, OwnerFacts, enforce};
use crate::extract::{AuthState, Json, Path, PgPool, Query, SanitizedJson};
use crate::handler::request::{Pagination, UpdateProfile, VolunteerPathParams};
use crate::handler::response::{OrganizationSummary, Profile, Profiles};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for volunteer operations.
const TRACING_TARGET: &str = "paws_server::handler::volunteers";

fn volunteer_not_found(volunteer_id: Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Volunteer not found")
        .with_context(format!("Volunteer ID: {volunteer_id}"))
        .with_resource("user")
}

/// Loads a user that holds the volunteer role.
async fn find_volunteer(conn: &mut PgConn, volunteer_id: Uuid) -> Result<User> {
    match conn.find_user_by_id(volunteer_id).await? {
        Some(user) if user.role == UserRole::Volunteer => Ok(user),
        _ => Err(volunteer_not_found(volunteer_id)),
    }
}

/// Lists volunteers.
///
/// Organization accounts see their own volunteers and administrators see
/// all of them.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn list_volunteers(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Profiles>> {
    validator::Validate::validate(&pagination)?;

    let organization_id = match identity.actor {
        Actor::AdminAccount { .. } => None,
        Actor::OrgAccount {
            organization_id, ..
        } => Some(organization_id),
        Actor::VolunteerAccount { .. } => {
            return Err(ErrorKind::Forbidden
                .with_message("Only organizations can list volunteers")
                .with_resource("user"));
        }
    };

    let volunteers = conn
        .list_volunteers(organization_id, pagination.into())
        .await?;

    let mut summaries: HashMap<Uuid, Option<OrganizationSummary>> = HashMap::new();
    let mut profiles = Vec::with_capacity(volunteers.len());
    for volunteer in volunteers {
        let organization = match volunteer.organization_id {
            Some(organization_id) => {
                if !summaries.contains_key(&organization_id) {
                    let summary = conn
                        .find_organization_by_id(organization_id)
                        .await?
                        .as_ref()
                        .map(OrganizationSummary::from_model);
                    summaries.insert(organization_id, summary);
                }
                summaries.get(&organization_id).cloned().flatten()
            }
            None => None,
        };

        profiles.push(Profile::for_viewer(volunteer, organization, Some(&identity)));
    }

    tracing::debug!(
        target: TRACING_TARGET,
        count = profiles.len(),
        "volunteers listed"
    );

    Ok(Json(profiles))
}

/// Returns a volunteer profile shaped for the caller, who may be anonymous.
#[tracing::instrument(skip_all, fields(volunteer_id = %path_params.volunteer_id))]
async fn read_volunteer(
    PgPool(mut conn): PgPool,
    auth_state: Option<AuthState>,
    Path(path_params): Path<VolunteerPathParams>,
) -> Result<Json<Profile>> {
    let viewer = auth_state.map(|AuthState(identity)| identity);
    let volunteer = find_volunteer(&mut conn, path_params.volunteer_id).await?;

    let organization = organization_summary(&mut conn, &volunteer).await?;
    let profile = Profile::for_viewer(volunteer, organization, viewer.as_ref());

    tracing::debug!(
        target: TRACING_TARGET,
        full = profile.is_full(),
        "volunteer profile read"
    );

    Ok(Json(profile))
}

/// Updates a volunteer profile. The volunteer and administrators only.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, volunteer_id = %path_params.volunteer_id))]
async fn update_volunteer(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<VolunteerPathParams>,
    SanitizedJson(request, _): SanitizedJson<UpdateProfile>,
) -> Result<Json<Profile>> {
    let volunteer_id = path_params.volunteer_id;
    let volunteer = find_volunteer(&mut conn, volunteer_id).await?;
    enforce(
        Some(&identity),
        Action::Update,
        &OwnerFacts::user_profile(&volunteer),
    )?;

    let volunteer = conn
        .update_user(volunteer_id, request.into_model())
        .await?
        .ok_or_else(|| volunteer_not_found(volunteer_id))?;

    tracing::info!(target: TRACING_TARGET, "volunteer profile updated");

    let organization = organization_summary(&mut conn, &volunteer).await?;
    Ok(Json(Profile::for_viewer(
        volunteer,
        organization,
        Some(&identity),
    )))
}

/// Removes a volunteer.
///
/// The volunteer and administrators delete the account. An organization
/// account only takes the volunteer out of its organization.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, volunteer_id = %path_params.volunteer_id))]
async fn delete_volunteer(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<VolunteerPathParams>,
) -> Result<StatusCode> {
    let volunteer_id = path_params.volunteer_id;
    let volunteer = find_volunteer(&mut conn, volunteer_id).await?;

    if identity.is_admin() || identity.is_user(volunteer_id) {
        enforce(
            Some(&identity),
            Action::Delete,
            &OwnerFacts::user_profile(&volunteer),
        )?;

        if !conn.delete_user(volunteer_id).await? {
            return Err(volunteer_not_found(volunteer_id));
        }

        tracing::warn!(target: TRACING_TARGET, "volunteer account deleted");
        return Ok(StatusCode::OK);
    }

    enforce(
        Some(&identity),
        Action::Remove,
        &OwnerFacts::membership(volunteer.organization_id),
    )?;

    conn.detach_user_from_organization(volunteer_id)
        .await?
        .ok_or_else(|| volunteer_not_found(volunteer_id))?;

    tracing::info!(
        target: TRACING_TARGET,
        organization_id = ?volunteer.organization_id,
        "volunteer removed from organization"
    );

    Ok(StatusCode::OK)
}

/// Returns the public volunteer routes.
pub fn public_routes() -> Router<ServiceState> {
    Router::new().route("/api/volunteers/{volunteerId}", get(read_volunteer))
}

/// Returns the volunteer routes that need a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/volunteers", get(list_volunteers))
        .route(
            "/api/volunteers/{volunteerId}",
            patch(update_volunteer).delete(delete_volunteer),
        )
}

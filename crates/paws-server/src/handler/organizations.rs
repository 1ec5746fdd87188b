//! Organization handlers.
//!
//! Registration is public and creates the organization together with the
//! `ORGANIZATION` account that administers it, both unverified until an
//! administrator reviews them.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post};
use paws_postgres::PgConn;
use paws_postgres::model::{NewUser, Organization as OrganizationModel};
use paws_postgres::query::{OrganizationRepository, UserRepository};
use paws_postgres::types::UserRole;
use uuid::Uuid;

use crate::authz::{Action, OwnerFacts, enforce};
use crate::extract::{AuthState, Json, Path, PgPool, Query, SanitizedJson, ValidateJson};
use crate::handler::request::{
    OrganizationPathParams, Pagination, RegisterOrganization, UpdateOrganization,
};
use crate::handler::response::{Organization, Organizations};
use crate::handler::{Error, ErrorKind, Result};
use crate::middleware::rate_limit_by_ip;
use crate::service::{PasswordHasher, ServiceState};

/// Tracing target for organization operations.
const TRACING_TARGET: &str = "paws_server::handler::organizations";

fn organization_not_found(organization_id: Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Organization not found")
        .with_context(format!("Organization ID: {organization_id}"))
        .with_resource("organization")
}

async fn find_organization(
    conn: &mut PgConn,
    organization_id: Uuid,
) -> Result<OrganizationModel> {
    conn.find_organization_by_id(organization_id)
        .await?
        .ok_or_else(|| organization_not_found(organization_id))
}

/// Registers an organization and its administering account.
///
/// Both rows are written in one transaction, so a duplicate email or
/// registration number leaves nothing behind.
#[tracing::instrument(skip_all)]
async fn register_organization(
    PgPool(mut conn): PgPool,
    State(password_hasher): State<PasswordHasher>,
    ValidateJson(request): ValidateJson<RegisterOrganization>,
) -> Result<(StatusCode, Json<Organization>)> {
    let email = request.normalized_email();
    if conn.email_exists(&email).await? {
        return Err(ErrorKind::Conflict
            .with_message("An account with this email address already exists")
            .with_resource("user"));
    }

    let password_hash = password_hasher.hash_password(&request.password)?;
    let new_organization = request.into_model();

    let (organization, account) = conn
        .transaction(|conn| {
            Box::pin(async move {
                let organization = conn.create_organization(new_organization).await?;
                let account = conn
                    .create_user(NewUser {
                        role: UserRole::Organization,
                        email,
                        password_hash,
                        verified: false,
                        organization_id: Some(organization.id),
                        ..Default::default()
                    })
                    .await?;

                Ok::<_, Error<'static>>((organization, account))
            })
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        organization_id = %organization.id,
        account_id = %account.id,
        "organization registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(Organization::from_model(organization)),
    ))
}

/// Lists organizations.
#[tracing::instrument(skip_all)]
async fn list_organizations(
    PgPool(mut conn): PgPool,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Organizations>> {
    validator::Validate::validate(&pagination)?;

    let organizations = conn.list_organizations(pagination.into()).await?;
    Ok(Json(Organization::from_models(organizations)))
}

/// Returns one organization.
#[tracing::instrument(skip_all, fields(organization_id = %path_params.organization_id))]
async fn read_organization(
    PgPool(mut conn): PgPool,
    Path(path_params): Path<OrganizationPathParams>,
) -> Result<Json<Organization>> {
    let organization = find_organization(&mut conn, path_params.organization_id).await?;
    Ok(Json(Organization::from_model(organization)))
}

/// Updates an organization profile.
///
/// Only the organization's own account and administrators get here.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, organization_id = %path_params.organization_id))]
async fn update_organization(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<OrganizationPathParams>,
    SanitizedJson(request, _): SanitizedJson<UpdateOrganization>,
) -> Result<Json<Organization>> {
    let organization_id = path_params.organization_id;
    let organization = find_organization(&mut conn, organization_id).await?;
    enforce(
        Some(&identity),
        Action::Update,
        &OwnerFacts::organization(&organization),
    )?;

    let organization = conn
        .update_organization(organization_id, request.into_model())
        .await?
        .ok_or_else(|| organization_not_found(organization_id))?;

    tracing::info!(target: TRACING_TARGET, "organization updated");
    Ok(Json(Organization::from_model(organization)))
}

/// Deletes an organization. Administrators only.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, organization_id = %path_params.organization_id))]
async fn delete_organization(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<OrganizationPathParams>,
) -> Result<StatusCode> {
    let organization_id = path_params.organization_id;
    let organization = find_organization(&mut conn, organization_id).await?;
    enforce(
        Some(&identity),
        Action::Delete,
        &OwnerFacts::organization(&organization),
    )?;

    if !conn.delete_organization(organization_id).await? {
        return Err(organization_not_found(organization_id));
    }

    tracing::warn!(target: TRACING_TARGET, "organization deleted");
    Ok(StatusCode::OK)
}

/// Marks an organization and its accounts as reviewed. Administrators only.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, organization_id = %path_params.organization_id))]
async fn verify_organization(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<OrganizationPathParams>,
) -> Result<Json<Organization>> {
    if !identity.is_admin() {
        return Err(ErrorKind::Forbidden
            .with_message("Only administrators can verify organizations")
            .with_resource("organization"));
    }

    let organization_id = path_params.organization_id;
    let organization = conn
        .transaction(|conn| {
            Box::pin(async move {
                let organization = conn.verify_organization(organization_id).await?;
                Ok::<_, Error<'static>>(organization)
            })
        })
        .await?
        .ok_or_else(|| organization_not_found(organization_id))?;

    tracing::info!(target: TRACING_TARGET, "organization verified");
    Ok(Json(Organization::from_model(organization)))
}

/// Returns the public organization routes.
pub fn public_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/api/organizations", get(list_organizations))
        .route(
            "/api/organizations",
            post(register_organization).route_layer(from_fn_with_state(state, rate_limit_by_ip)),
        )
        .route("/api/organizations/{organizationId}", get(read_organization))
}

/// Returns the organization routes that need a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new()
        .route(
            "/api/organizations/{organizationId}",
            patch(update_organization).delete(delete_organization),
        )
        .route(
            "/api/organizations/{organizationId}/verify",
            post(verify_organization),
        )
}

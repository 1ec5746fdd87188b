//! Volunteer registration handlers.
//!
//! Applicants register publicly. The organization they apply to reviews the
//! pending registration: approving creates a verified volunteer account and
//! marks the registration in a single transaction.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use paws_postgres::PgConn;
use paws_postgres::model::{NewUser, VolunteerRegistration};
use paws_postgres::query::{
    OrganizationRepository, UserRepository, VolunteerRegistrationRepository,
};
use paws_postgres::types::UserRole;
use uuid::Uuid;

use crate::authz::{Action, Actor, Identity, OwnerFacts, enforce};
use crate::extract::{AuthState, Json, Path, PgPool, Query, ValidateJson};
use crate::handler::request::{CreateRegistration, Pagination, RegistrationPathParams};
use crate::handler::response::{Registration, Registrations};
use crate::handler::{Error, ErrorKind, Result};
use crate::middleware::rate_limit_by_ip;
use crate::service::{PasswordHasher, ServiceState};

/// Tracing target for volunteer registration operations.
const TRACING_TARGET: &str = "paws_server::handler::volunteer_registration";

fn registration_not_found(registration_id: Uuid) -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Registration not found")
        .with_context(format!("Registration ID: {registration_id}"))
        .with_resource("volunteer_registration")
}

fn already_approved() -> Error<'static> {
    ErrorKind::Conflict
        .with_message("Registration has already been approved")
        .with_resource("volunteer_registration")
}

/// Loads a registration and checks the caller manages its organization.
async fn find_managed_registration(
    conn: &mut PgConn,
    registration_id: Uuid,
    identity: &Identity,
    action: Action,
) -> Result<VolunteerRegistration> {
    let registration = conn
        .find_registration_by_id(registration_id)
        .await?
        .ok_or_else(|| registration_not_found(registration_id))?;

    enforce(
        Some(identity),
        action,
        &OwnerFacts::membership(Some(registration.organization_id)),
    )?;

    if !registration.is_pending() {
        return Err(already_approved());
    }

    Ok(registration)
}

/// Applies to volunteer with an organization.
///
/// The password is hashed before it is stored and never returned.
#[tracing::instrument(skip_all, fields(organization_id = %request.organization_id))]
async fn create_registration(
    PgPool(mut conn): PgPool,
    State(password_hasher): State<PasswordHasher>,
    ValidateJson(request): ValidateJson<CreateRegistration>,
) -> Result<(StatusCode, Json<Registration>)> {
    if conn
        .find_organization_by_id(request.organization_id)
        .await?
        .is_none()
    {
        return Err(ErrorKind::NotFound
            .with_message("Organization not found")
            .with_resource("organization"));
    }

    if conn.email_exists(&request.normalized_email()).await? {
        return Err(ErrorKind::Conflict
            .with_message("An account with this email address already exists")
            .with_resource("user"));
    }

    let password_hash = password_hasher.hash_password(&request.password)?;
    let registration = conn
        .create_registration(request.into_model(password_hash))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        registration_id = %registration.id,
        "volunteer registration created"
    );

    Ok((
        StatusCode::CREATED,
        Json(Registration::from_model(registration)),
    ))
}

/// Lists pending registrations.
///
/// Organization accounts see their own and administrators see all.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn list_registrations(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Registrations>> {
    validator::Validate::validate(&pagination)?;

    let organization_id = match identity.actor {
        Actor::AdminAccount { .. } => None,
        Actor::OrgAccount {
            organization_id, ..
        } => Some(organization_id),
        Actor::VolunteerAccount { .. } => {
            return Err(ErrorKind::Forbidden
                .with_message("Only organizations can review registrations")
                .with_resource("volunteer_registration"));
        }
    };

    let registrations = conn
        .list_pending_registrations(organization_id, pagination.into())
        .await?;

    Ok(Json(Registration::from_models(registrations)))
}

/// Approves a pending registration.
///
/// Creates the verified volunteer account and marks the registration in
/// one transaction. A duplicate email or a concurrent approval rolls both
/// writes back.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, registration_id = %path_params.registration_id))]
async fn approve_registration(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<RegistrationPathParams>,
) -> Result<Json<Registration>> {
    let registration = find_managed_registration(
        &mut conn,
        path_params.registration_id,
        &identity,
        Action::Invite,
    )
    .await?;

    let registration_id = registration.id;
    let new_user = NewUser {
        role: UserRole::Volunteer,
        email: registration.email,
        password_hash: registration.password_hash,
        first_name: Some(registration.first_name),
        last_name: Some(registration.last_name),
        phone: registration.phone,
        city: registration.city,
        state: registration.state,
        verified: true,
        organization_id: Some(registration.organization_id),
        ..Default::default()
    };

    let (user, registration) = conn
        .transaction(|conn| {
            Box::pin(async move {
                let user = conn.create_user(new_user).await?;
                let registration = conn
                    .mark_registration_approved(registration_id, user.id)
                    .await?
                    .ok_or_else(already_approved)?;

                Ok::<_, Error<'static>>((user, registration))
            })
        })
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        volunteer_id = %user.id,
        organization_id = %registration.organization_id,
        "volunteer registration approved"
    );

    Ok(Json(Registration::from_model(registration)))
}

/// Rejects a pending registration, deleting it.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, registration_id = %path_params.registration_id))]
async fn reject_registration(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<RegistrationPathParams>,
) -> Result<StatusCode> {
    let registration = find_managed_registration(
        &mut conn,
        path_params.registration_id,
        &identity,
        Action::Remove,
    )
    .await?;

    if !conn.reject_registration(registration.id).await? {
        return Err(already_approved());
    }

    tracing::info!(
        target: TRACING_TARGET,
        organization_id = %registration.organization_id,
        "volunteer registration rejected"
    );

    Ok(StatusCode::OK)
}

/// Returns the public registration routes.
pub fn public_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new().route(
        "/api/volunteer-registration",
        post(create_registration).route_layer(from_fn_with_state(state, rate_limit_by_ip)),
    )
}

/// Returns the registration routes that need a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new()
        .route("/api/volunteer-registration", get(list_registrations))
        .route(
            "/api/volunteer-registration/{registrationId}/approve",
            post(approve_registration),
        )
        .route(
            "/api/volunteer-registration/{registrationId}/reject",
            post(reject_registration),
        )
}

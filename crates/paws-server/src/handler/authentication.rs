//! Login and session handlers.
//!
//! Sessions are stateless bearer tokens. Login checks the Argon2 hash and
//! signs the caller's role, verification flag and organization into the
//! token; the session route echoes the normalized identity back.

use axum::Router;
use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use paws_postgres::model::User;
use paws_postgres::query::{OrganizationRepository, UserRepository};
use paws_postgres::types::UserRole;
use paws_postgres::{PgConn, PgResult};

use crate::authz::Identity;
use crate::extract::{AuthClaims, AuthState, Json, PgPool, ValidateJson};
use crate::handler::request::{Login, normalize_email};
use crate::handler::response::{LoginResponse, SessionIdentity};
use crate::handler::{ErrorKind, Result};
use crate::middleware::rate_limit_by_ip;
use crate::service::{PasswordHasher, ServiceState, SessionKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "paws_server::handler::authentication";

/// Verified flag carried by a new session.
///
/// Organization accounts act for their organization, so they take the
/// organization's flag rather than their own.
async fn session_verified(conn: &mut PgConn, user: &User) -> PgResult<bool> {
    match (user.role, user.organization_id) {
        (UserRole::Organization, Some(organization_id)) => Ok(conn
            .find_organization_by_id(organization_id)
            .await?
            .is_some_and(|organization| organization.verified)),
        (UserRole::Organization, None) => Ok(false),
        _ => Ok(user.verified),
    }
}

/// Signs in with email and password.
///
/// Unknown emails and wrong passwords produce the same `401`, and unknown
/// emails still pay for one hash verification.
#[tracing::instrument(skip_all)]
async fn login(
    PgPool(mut conn): PgPool,
    State(password_hasher): State<PasswordHasher>,
    State(session_keys): State<SessionKeys>,
    ValidateJson(request): ValidateJson<Login>,
) -> Result<Json<LoginResponse>> {
    let email = normalize_email(&request.email);

    let Some(user) = conn.find_user_by_email(&email).await? else {
        password_hasher.verify_dummy_password(&request.password);
        tracing::debug!(target: TRACING_TARGET, "login for unknown email");
        return Err(ErrorKind::Unauthorized
            .with_message("Invalid email or password")
            .with_resource("authentication"));
    };

    password_hasher.verify_password(&request.password, &user.password_hash)?;

    let verified = session_verified(&mut conn, &user).await?;
    let Some(identity) = Identity::new(user.id, user.role, verified, user.organization_id) else {
        tracing::error!(
            target: TRACING_TARGET,
            user_id = %user.id,
            "organization account without organization"
        );
        return Err(ErrorKind::Unauthorized
            .with_message("Invalid email or password")
            .with_resource("authentication"));
    };

    let claims = AuthClaims::for_user(&user, verified, session_keys.ttl())?;
    let token = claims.encode(session_keys.encoding_key())?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        role = %user.role,
        verified,
        token_id = %claims.token_id,
        "user logged in"
    );

    Ok(Json(LoginResponse {
        token,
        expires_at: claims.expires_at,
        identity: SessionIdentity::from_identity(&identity),
    }))
}

/// Returns the normalized identity of the caller.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn session(AuthState(identity): AuthState) -> Result<Json<SessionIdentity>> {
    Ok(Json(SessionIdentity::from_identity(&identity)))
}

/// Returns the public authentication routes.
pub fn public_routes(state: ServiceState) -> Router<ServiceState> {
    Router::new().route(
        "/api/auth/login",
        post(login).route_layer(from_fn_with_state(state, rate_limit_by_ip)),
    )
}

/// Returns the authentication routes that need a session.
pub fn private_routes() -> Router<ServiceState> {
    Router::new().route("/api/auth/session", get(session))
}

//! End-to-end workflows against a real PostgreSQL database.
//!
//! These tests need `POSTGRES_URL` (read from the environment or a `.env`
//! file) and are ignored by default:
//!
//! ```sh
//! cargo test -p paws-server --test workflows -- --ignored
//! ```

use axum::http::StatusCode;
use axum_test::TestServer;
use bytes::Bytes;
use jiff::{SignedDuration, Timestamp};
use paws_postgres::model::NewMedia;
use paws_postgres::query::MediaRepository;
use paws_server::extract::AuthClaims;
use paws_server::handler::routes;
use paws_server::service::{ServiceConfig, ServiceState};
use serde_json::{Value, json};
use tokio::sync::OnceCell;
use uuid::Uuid;

const SECRET: &str = "workflow-tests-secret-0123456789abcdef";
const PASSWORD: &str = "correct horse battery";

static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn create_test_server() -> anyhow::Result<(TestServer, ServiceState)> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("POSTGRES_URL")?;

    let config = ServiceConfig::new(database_url, SECRET);
    let state = ServiceState::from_config(&config)?;

    MIGRATED
        .get_or_try_init(|| async {
            let _applied = state.run_migrations().await?;
            anyhow::Ok(())
        })
        .await?;

    let app = routes(state.clone()).with_state(state.clone());
    Ok((TestServer::new(app)?, state))
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

fn bearer_token(
    state: &ServiceState,
    user_id: Uuid,
    role: &str,
    organization_id: Option<Uuid>,
) -> anyhow::Result<String> {
    let now = Timestamp::now();
    let claims = AuthClaims::new(
        user_id,
        role,
        true,
        organization_id,
        now,
        now + SignedDuration::from_hours(1),
    );
    let token = claims.encode(state.session_keys.encoding_key())?;
    Ok(format!("Bearer {token}"))
}

fn admin_token(state: &ServiceState) -> anyhow::Result<String> {
    bearer_token(state, Uuid::new_v4(), "ADMIN", None)
}

fn uuid_field(body: &Value, field: &str) -> anyhow::Result<Uuid> {
    let value = body[field]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("missing field '{field}' in {body}"))?;
    Ok(value.parse()?)
}

/// Registers an organization and returns its id together with the
/// account email.
async fn register_organization(server: &TestServer) -> anyhow::Result<(Uuid, String)> {
    let email = format!("{}@shelter.test", unique("org"));
    let response = server
        .post("/api/organizations")
        .json(&json!({
            "name": "Happy Tails Shelter",
            "registrationNumber": unique("REG"),
            "email": email,
            "password": PASSWORD,
            "city": "Springfield",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["verified"], false);
    Ok((uuid_field(&body, "id")?, email))
}

async fn submit_registration(
    server: &TestServer,
    organization_id: Uuid,
    email: &str,
) -> anyhow::Result<Uuid> {
    let response = server
        .post("/api/volunteer-registration")
        .json(&json!({
            "organizationId": organization_id,
            "email": email,
            "password": PASSWORD,
            "firstName": "Jamie",
            "lastName": "Rivera",
            "motivation": "I walk dogs every weekend.",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["verified"], false);
    uuid_field(&body, "id")
}

async fn login(server: &TestServer, email: &str) -> anyhow::Result<Value> {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": PASSWORD }))
        .await;
    response.assert_status_ok();
    Ok(response.json())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn organization_accounts_inherit_verification() -> anyhow::Result<()> {
    let (server, state) = create_test_server().await?;
    let (organization_id, email) = register_organization(&server).await?;

    let session = login(&server, &email).await?;
    assert_eq!(session["identity"]["role"], "ORGANIZATION");
    assert_eq!(session["identity"]["verified"], false);

    // Unverified accounts cannot write.
    let token = format!("Bearer {}", session["token"].as_str().unwrap_or_default());
    let response = server
        .post("/api/animals")
        .add_header("authorization", token)
        .json(&json!({ "name": "Biscuit", "species": "dog" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post(&format!("/api/organizations/{organization_id}/verify"))
        .add_header("authorization", admin_token(&state)?)
        .await;
    response.assert_status_ok();

    let session = login(&server, &email).await?;
    assert_eq!(session["identity"]["verified"], true);
    assert_eq!(
        session["identity"]["organizationId"],
        organization_id.to_string()
    );

    Ok(())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn unverified_accounts_cannot_edit_their_profile() -> anyhow::Result<()> {
    let (server, _) = create_test_server().await?;
    let (_, email) = register_organization(&server).await?;

    let session = login(&server, &email).await?;
    assert_eq!(session["identity"]["verified"], false);
    let token = format!("Bearer {}", session["token"].as_str().unwrap_or_default());

    let response = server
        .patch("/api/user/profile")
        .add_header("authorization", token.clone())
        .json(&json!({
            "firstName": "Mallory",
            "image": "https://images.example/avatar.png",
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .get("/api/user/profile")
        .add_header("authorization", token)
        .await;
    response.assert_status_ok();

    let profile: Value = response.json();
    assert_ne!(profile["firstName"], "Mallory");

    Ok(())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let (server, _) = create_test_server().await?;
    let (_, email) = register_organization(&server).await?;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "not the password" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn approved_volunteers_can_sign_in() -> anyhow::Result<()> {
    let (server, state) = create_test_server().await?;
    let (organization_id, _) = register_organization(&server).await?;
    let volunteer_email = format!("{}@volunteer.test", unique("jamie"));
    let registration_id = submit_registration(&server, organization_id, &volunteer_email).await?;

    let org_token = bearer_token(
        &state,
        Uuid::new_v4(),
        "ORGANIZATION",
        Some(organization_id),
    )?;

    let response = server
        .post(&format!(
            "/api/volunteer-registration/{registration_id}/approve"
        ))
        .add_header("authorization", org_token.clone())
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["verified"], true);
    assert!(body["userId"].is_string());

    // A second approval must not link another account.
    let response = server
        .post(&format!(
            "/api/volunteer-registration/{registration_id}/approve"
        ))
        .add_header("authorization", org_token)
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let session = login(&server, &volunteer_email).await?;
    assert_eq!(session["identity"]["role"], "VOLUNTEER");
    assert_eq!(session["identity"]["verified"], true);

    Ok(())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn failed_approval_leaves_registration_pending() -> anyhow::Result<()> {
    let (server, state) = create_test_server().await?;
    let (organization_id, _) = register_organization(&server).await?;
    let volunteer_email = format!("{}@volunteer.test", unique("casey"));
    let registration_id = submit_registration(&server, organization_id, &volunteer_email).await?;

    // Another organization claims the email before the approval.
    let response = server
        .post("/api/organizations")
        .json(&json!({
            "name": "Second Chance Rescue",
            "registrationNumber": unique("REG"),
            "email": volunteer_email,
            "password": PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let org_token = bearer_token(
        &state,
        Uuid::new_v4(),
        "ORGANIZATION",
        Some(organization_id),
    )?;

    let response = server
        .post(&format!(
            "/api/volunteer-registration/{registration_id}/approve"
        ))
        .add_header("authorization", org_token.clone())
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server
        .get("/api/volunteer-registration")
        .add_header("authorization", org_token)
        .await;
    response.assert_status_ok();

    let pending: Vec<Value> = response.json();
    let registration = pending
        .iter()
        .find(|registration| registration["id"] == registration_id.to_string())
        .ok_or_else(|| anyhow::anyhow!("registration is no longer pending"))?;
    assert_eq!(registration["verified"], false);
    assert_eq!(registration["userId"], Value::Null);

    Ok(())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn unknown_animal_status_is_stored_as_other() -> anyhow::Result<()> {
    let (server, state) = create_test_server().await?;
    let (organization_id, email) = register_organization(&server).await?;

    server
        .post(&format!("/api/organizations/{organization_id}/verify"))
        .add_header("authorization", admin_token(&state)?)
        .await
        .assert_status_ok();

    let session = login(&server, &email).await?;
    let token = format!("Bearer {}", session["token"].as_str().unwrap_or_default());

    let response = server
        .post("/api/animals")
        .add_header("authorization", token.clone())
        .json(&json!({ "name": "Pepper", "species": "cat", "status": "INVALID" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["status"], "OTHER");
    let animal_id = uuid_field(&body, "id")?;

    // Animals stay private to the organization.
    let outsider = bearer_token(&state, Uuid::new_v4(), "VOLUNTEER", None)?;
    let response = server
        .get(&format!("/api/animals/{animal_id}"))
        .add_header("authorization", outsider)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .get(&format!("/api/animals/{animal_id}"))
        .add_header("authorization", token.clone())
        .await;
    response.assert_status_ok();

    // Species matches case-insensitively but never as a wildcard.
    for (species, expected) in [("CAT", 1), ("c_t", 0), ("%", 0)] {
        let response = server
            .get("/api/animals")
            .add_header("authorization", token.clone())
            .add_query_param("species", species)
            .await;
        response.assert_status_ok();

        let animals: Vec<Value> = response.json();
        assert_eq!(animals.len(), expected, "species={species}");
    }

    Ok(())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn story_slugs_are_unique() -> anyhow::Result<()> {
    let (server, state) = create_test_server().await?;
    let token = admin_token(&state)?;
    let slug = unique("first-week");

    let story = json!({
        "title": "My first week at the shelter",
        "slug": slug,
        "content": "Feeding time is loud.",
        "featured": true,
    });

    let response = server
        .post("/api/volunteer-stories")
        .add_header("authorization", token.clone())
        .json(&story)
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["featured"], true);

    let response = server
        .post("/api/volunteer-stories")
        .add_header("authorization", token)
        .json(&story)
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server
        .get("/api/volunteer-stories")
        .add_query_param("slug", &slug)
        .await;
    response.assert_status_ok();

    let stories: Vec<Value> = response.json();
    assert_eq!(stories.len(), 1);

    Ok(())
}

#[tokio::test]
#[ignore = "requires POSTGRES_URL"]
async fn reconcile_settles_expired_direct_uploads() -> anyhow::Result<()> {
    let (server, state) = create_test_server().await?;
    let (_, email) = register_organization(&server).await?;
    let session = login(&server, &email).await?;
    let user_id = uuid_field(&session["identity"], "userId")?;

    let expired = Timestamp::now() - SignedDuration::from_mins(5);
    let direct_upload = |name: &str| {
        let file_key = format!("uploads/{user_id}/{}.png", unique(name));
        NewMedia {
            url: state.storage.public_url(&file_key),
            file_key,
            content_type: Some("image/png".into()),
            size_bytes: 4,
            user_id,
            upload_expires_at: Some(expired.into()),
            ..NewMedia::default()
        }
    };

    let mut conn = state.pg_client.get_connection().await?;
    let arrived = conn.create_media(direct_upload("arrived")).await?;
    let abandoned = conn.create_media(direct_upload("abandoned")).await?;
    state
        .storage
        .write(&arrived.file_key, Bytes::from_static(b"\x89PNG"), Some("image/png"))
        .await?;

    let response = server
        .post("/api/upload/reconcile")
        .add_header("authorization", admin_token(&state)?)
        .await;
    response.assert_status_ok();

    let report: Value = response.json();
    assert!(report["confirmed"].as_u64() >= Some(1));
    assert!(report["abandoned"].as_u64() >= Some(1));

    let arrived = conn
        .find_media_by_file_key(&arrived.file_key)
        .await?
        .ok_or_else(|| anyhow::anyhow!("confirmed upload was removed"))?;
    assert!(!arrived.is_awaiting_upload());
    assert!(conn.find_media_by_file_key(&abandoned.file_key).await?.is_none());

    Ok(())
}

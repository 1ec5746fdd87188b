//! Animal listing handlers.
//!
//! Animals are private resources: they are owned by the user who listed
//! them and shared with that user's organization. A caller who may not see
//! an animal gets the same `404` as for an animal that does not exist.
//!
//! Updates and deletes are reachable both with the id in the path and, for
//! older clients, with the id in the body (`PATCH`) or query (`DELETE`).

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use paws_postgres::PgConn;
use paws_postgres::model::Animal as AnimalModel;
use paws_postgres::query::{AnimalRepository, AnimalVisibility, UserRepository};
use uuid::Uuid;

use crate::authz::{Action, Identity, OwnerFacts, ResourceKind, enforce};
use crate::extract::{AuthState, Json, Path, PgPool, Query, SanitizedJson, ValidateJson};
use crate::handler::request::{
    AnimalPathParams, CreateAnimal, IdQuery, ListAnimalsQuery, UpdateAnimal,
};
use crate::handler::response::{Animal, Animals};
use crate::handler::{Error, ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for animal operations.
const TRACING_TARGET: &str = "paws_server::handler::animals";

fn animal_not_found() -> Error<'static> {
    ErrorKind::NotFound
        .with_message("Animal not found")
        .with_resource("animal")
}

/// Loads an animal together with its ownership facts.
///
/// The organization comes from the creator's current affiliation.
pub(super) async fn find_animal(
    conn: &mut PgConn,
    animal_id: Uuid,
) -> Result<(AnimalModel, OwnerFacts)> {
    let Some(animal) = conn.find_animal_by_id(animal_id).await? else {
        return Err(animal_not_found());
    };

    let creator_organization_id = conn.find_user_organization_id(animal.created_by_id).await?;
    let owner = OwnerFacts::animal(&animal, creator_organization_id);
    Ok((animal, owner))
}

/// Lists the animals visible to the caller.
///
/// Administrators see every animal. Everyone else sees the animals they
/// listed plus those listed by members of their organization.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn list_animals(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Query(query): Query<ListAnimalsQuery>,
) -> Result<Json<Animals>> {
    validator::Validate::validate(&query)?;

    let visibility = if identity.is_admin() {
        AnimalVisibility::All
    } else {
        AnimalVisibility::Scoped {
            user_id: identity.user_id,
            organization_id: identity.organization_id(),
        }
    };

    let (filter, pagination) = query.into_filter();
    let animals = conn.list_animals(visibility, filter, pagination).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = animals.len(),
        "animals listed"
    );

    Ok(Json(Animal::from_models(animals)))
}

/// Lists a new animal created by the caller.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn create_animal(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    ValidateJson(request): ValidateJson<CreateAnimal>,
) -> Result<(StatusCode, Json<Animal>)> {
    let owner = OwnerFacts::new(
        ResourceKind::Animal,
        Some(identity.user_id),
        identity.organization_id(),
    );
    enforce(Some(&identity), Action::Create, &owner)?;

    let animal = conn
        .create_animal(request.into_model(identity.user_id))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        animal_id = %animal.id,
        status = %animal.status,
        "animal created"
    );

    Ok((StatusCode::CREATED, Json(Animal::from_model(animal))))
}

/// Returns one animal.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, animal_id = %path_params.animal_id))]
async fn read_animal(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<AnimalPathParams>,
) -> Result<Json<Animal>> {
    let (animal, owner) = find_animal(&mut conn, path_params.animal_id).await?;
    enforce(Some(&identity), Action::Read, &owner)?;

    Ok(Json(Animal::from_model(animal)))
}

async fn apply_update(
    conn: &mut PgConn,
    identity: &Identity,
    animal_id: Uuid,
    request: UpdateAnimal,
) -> Result<Animal> {
    let (_, owner) = find_animal(conn, animal_id).await?;
    enforce(Some(identity), Action::Update, &owner)?;

    let changes = request.into_model();
    let is_noop = changes.is_empty();
    let Some(animal) = conn.update_animal(animal_id, changes).await? else {
        return Err(animal_not_found());
    };

    tracing::info!(
        target: TRACING_TARGET,
        animal_id = %animal.id,
        noop = is_noop,
        "animal updated"
    );

    Ok(Animal::from_model(animal))
}

/// Updates the animal named in the path.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, animal_id = %path_params.animal_id))]
async fn update_animal(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<AnimalPathParams>,
    SanitizedJson(request, _): SanitizedJson<UpdateAnimal>,
) -> Result<Json<Animal>> {
    let animal = apply_update(&mut conn, &identity, path_params.animal_id, request).await?;
    Ok(Json(animal))
}

/// Updates the animal whose `id` is part of the body.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
async fn update_animal_by_body(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    SanitizedJson(request, protected): SanitizedJson<UpdateAnimal>,
) -> Result<Json<Animal>> {
    let animal_id = protected.require_id()?;
    let animal = apply_update(&mut conn, &identity, animal_id, request).await?;
    Ok(Json(animal))
}

async fn apply_delete(conn: &mut PgConn, identity: &Identity, animal_id: Uuid) -> Result<()> {
    let (_, owner) = find_animal(conn, animal_id).await?;
    enforce(Some(identity), Action::Delete, &owner)?;

    if !conn.delete_animal(animal_id).await? {
        return Err(animal_not_found());
    }

    tracing::info!(
        target: TRACING_TARGET,
        animal_id = %animal_id,
        deleted_by = %identity.user_id,
        "animal deleted"
    );

    Ok(())
}

/// Permanently deletes the animal named in the path.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, animal_id = %path_params.animal_id))]
async fn delete_animal(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Path(path_params): Path<AnimalPathParams>,
) -> Result<StatusCode> {
    apply_delete(&mut conn, &identity, path_params.animal_id).await?;
    Ok(StatusCode::OK)
}

/// Permanently deletes the animal named by `?id=`.
#[tracing::instrument(skip_all, fields(user_id = %identity.user_id, animal_id = %query.id))]
async fn delete_animal_by_query(
    PgPool(mut conn): PgPool,
    AuthState(identity): AuthState,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode> {
    apply_delete(&mut conn, &identity, query.id).await?;
    Ok(StatusCode::OK)
}

/// Returns the animal routes. All of them need a session.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route(
            "/api/animals",
            get(list_animals)
                .post(create_animal)
                .patch(update_animal_by_body)
                .delete(delete_animal_by_query),
        )
        .route(
            "/api/animals/{animalId}",
            get(read_animal)
                .patch(update_animal)
                .delete(delete_animal),
        )
}

//! Animal repository and list filters.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{Animal, NewAnimal, UpdateAnimal};
use crate::types::{AnimalStatus, Pagination};
use crate::{PgConnection, PgError, PgResult, schema};

/// Which animals a caller may see in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalVisibility {
    /// Every animal.
    All,
    /// Animals created by the user or by any member of the organization.
    Scoped {
        user_id: Uuid,
        organization_id: Option<Uuid>,
    },
}

/// Optional filters for listing animals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalFilter {
    /// Case-insensitive substring matched against name, breed and description.
    pub query: Option<String>,
    /// Case-insensitive species match.
    pub species: Option<String>,
    /// Exact status match.
    pub status: Option<AnimalStatus>,
    /// Animal to leave out, e.g. the one currently displayed.
    pub exclude: Option<Uuid>,
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Substring pattern for free-text search.
fn like_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}

/// Repository for animal database operations.
pub trait AnimalRepository {
    /// Creates a new animal.
    fn create_animal(
        &mut self,
        new_animal: NewAnimal,
    ) -> impl Future<Output = PgResult<Animal>> + Send;

    /// Finds an animal by its unique identifier.
    fn find_animal_by_id(
        &mut self,
        animal_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Animal>>> + Send;

    /// Lists animals visible to the caller, newest first.
    fn list_animals(
        &mut self,
        visibility: AnimalVisibility,
        filter: AnimalFilter,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<Animal>>> + Send;

    /// Applies a partial update.
    ///
    /// Returns `None` when the animal does not exist. An empty changeset
    /// returns the current row untouched.
    fn update_animal(
        &mut self,
        animal_id: Uuid,
        updates: UpdateAnimal,
    ) -> impl Future<Output = PgResult<Option<Animal>>> + Send;

    /// Permanently deletes an animal. Returns whether a row was removed.
    fn delete_animal(&mut self, animal_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl AnimalRepository for PgConnection {
    async fn create_animal(&mut self, new_animal: NewAnimal) -> PgResult<Animal> {
        use schema::animals;

        diesel::insert_into(animals::table)
            .values(&new_animal)
            .returning(Animal::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)
    }

    async fn find_animal_by_id(&mut self, animal_id: Uuid) -> PgResult<Option<Animal>> {
        use schema::animals::{self, dsl};

        animals::table
            .filter(dsl::id.eq(animal_id))
            .select(Animal::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn list_animals(
        &mut self,
        visibility: AnimalVisibility,
        filter: AnimalFilter,
        pagination: Pagination,
    ) -> PgResult<Vec<Animal>> {
        use schema::animals::{self, dsl};
        use schema::users;

        let mut query = animals::table.into_boxed();

        match visibility {
            AnimalVisibility::All => {}
            AnimalVisibility::Scoped {
                user_id,
                organization_id: None,
            } => {
                query = query.filter(dsl::created_by_id.eq(user_id));
            }
            AnimalVisibility::Scoped {
                user_id,
                organization_id: Some(organization_id),
            } => {
                let members = users::table
                    .filter(users::dsl::organization_id.eq(organization_id))
                    .select(users::dsl::id);

                query = query.filter(
                    dsl::created_by_id
                        .eq(user_id)
                        .or(dsl::created_by_id.eq_any(members)),
                );
            }
        }

        if let Some(search) = filter.query.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = like_pattern(search);
            query = query.filter(
                dsl::name
                    .ilike(pattern.clone())
                    .or(dsl::breed.ilike(pattern.clone()).assume_not_null())
                    .or(dsl::description.ilike(pattern).assume_not_null()),
            );
        }

        if let Some(species) = filter.species.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(dsl::species.ilike(escape_like(species)));
        }

        if let Some(status) = filter.status {
            query = query.filter(dsl::status.eq(status));
        }

        if let Some(exclude) = filter.exclude {
            query = query.filter(dsl::id.ne(exclude));
        }

        query
            .order((dsl::created_at.desc(), dsl::id.desc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Animal::as_select())
            .load(self)
            .await
            .map_err(PgError::from)
    }

    async fn update_animal(
        &mut self,
        animal_id: Uuid,
        updates: UpdateAnimal,
    ) -> PgResult<Option<Animal>> {
        use schema::animals::{self, dsl};

        if updates.is_empty() {
            return self.find_animal_by_id(animal_id).await;
        }

        diesel::update(animals::table.filter(dsl::id.eq(animal_id)))
            .set(&updates)
            .returning(Animal::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)
    }

    async fn delete_animal(&mut self, animal_id: Uuid) -> PgResult<bool> {
        use schema::animals::{self, dsl};

        let deleted = diesel::delete(animals::table.filter(dsl::id.eq(animal_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("rex"), "%rex%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn species_filter_matches_literally() {
        assert_eq!(escape_like("Cat"), "Cat");
        assert_eq!(escape_like("%"), "\\%");
        assert_eq!(escape_like("d_g"), "d\\_g");
    }
}

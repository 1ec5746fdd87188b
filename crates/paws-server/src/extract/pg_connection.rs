//! PostgreSQL connection extractor for request handlers.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut};
use paws_postgres::{PgClient, PgConn};

use crate::handler::Error;

/// Pooled connection checked out for the duration of one request.
///
/// Every repository trait is available on the connection:
///
/// ```rust,ignore
/// async fn handler(PgPool(mut conn): PgPool) -> Result<()> {
///     let animal = conn.find_animal_by_id(animal_id).await?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Deref, DerefMut)]
pub struct PgPool(pub PgConn);

impl<S> FromRequestParts<S> for PgPool
where
    PgClient: FromRef<S>,
    S: Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pg_client = PgClient::from_ref(state);
        let conn = pg_client.get_connection().await?;
        Ok(Self(conn))
    }
}

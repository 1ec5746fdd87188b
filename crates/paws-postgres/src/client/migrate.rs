//! Embedded migration runner.

use std::time::{Duration, Instant};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct MigrationResult {
    /// Versions applied during this run, oldest first.
    pub applied_versions: Vec<String>,
    /// Wall-clock time spent applying migrations.
    pub duration: Duration,
}

impl MigrationResult {
    /// Returns whether the schema was already up to date.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.applied_versions.is_empty()
    }
}

/// Runs all pending embedded migrations.
///
/// The diesel migration harness is synchronous, so the pooled connection is
/// wrapped and driven from a blocking task.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationResult> {
    tracing::info!(target: TRACING_TARGET_MIGRATION, "Starting database migration process");

    let start_time = Instant::now();
    let conn = pg.get_pooled_connection().await?;
    let mut conn: AsyncConnectionWrapper<_> = conn.into();

    let versions = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.into_iter().map(|v| v.to_string()).collect::<Vec<_>>())
    })
    .await
    .map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            error = %err,
            "Migration task panicked"
        );
        PgError::Migration(err.into())
    })?
    .map_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            error = %err,
            "Database migration process failed"
        );
        PgError::Migration(err)
    })?;

    let duration = start_time.elapsed();
    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?duration,
        migrations_count = versions.len(),
        "Database migration process completed"
    );

    Ok(MigrationResult {
        applied_versions: versions,
        duration,
    })
}

//! Embedded sqlx migrations.

use sqlx::PgPool;
use tracing::info;

use cardhub_core::error::{AppError, ErrorKind};

/// Apply any migrations not yet recorded in `_sqlx_migrations`.
///
/// Runs at startup before the server binds; a failed migration is
/// fatal rather than something to limp past.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
        })?;

    info!("Database schema is up to date");
    Ok(())
}

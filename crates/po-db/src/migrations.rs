//! # Journal Schema
//!
//! The `local_drafts` table comes from the SQL files in `migrations/sqlite`,
//! compiled into the binary. Applied versions are recorded in
//! `_sqlx_migrations`, so reopening an existing journal changes nothing.
//!
//! New schema changes go in a new `NNN_description.sql` file; applied files
//! are never edited.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies any schema change the journal has not seen yet.
pub(crate) async fn migrate(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    debug!(versions = MIGRATOR.migrations.len(), "Journal schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn test_migrate_twice_is_a_no_op() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        migrate(&pool).await.unwrap();
        migrate(&pool).await.unwrap();

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(applied as usize, MIGRATOR.migrations.len());
    }
}

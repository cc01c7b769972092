/// Database migration runner
///
/// This module runs the embedded SQL migrations using sqlx's migration
/// system. Migrations live in the `migrations/` directory of this crate and
/// define the clubs/profiles/matches schema as well as the optional
/// server-side SQL functions (`delete_club_cascade`,
/// `nullify_preferred_club`, `get_basic_counts`).
///
/// # Example
///
/// ```no_run
/// use clubdesk_shared::db::pool::{create_pool, DatabaseConfig};
/// use clubdesk_shared::db::migrations::run_migrations;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if:
/// - A migration file is malformed
/// - A migration fails to execute
/// - Database connection is lost during migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

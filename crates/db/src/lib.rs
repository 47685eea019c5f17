use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod error;
pub mod mapping;
pub mod models;
pub mod repositories;

pub use error::{is_foreign_key_violation, RepoError};

pub type DbPool = sqlx::SqlitePool;

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQL expression producing an RFC 3339 UTC timestamp with milliseconds.
///
/// Used for column defaults and `updated_at` so the stored text always
/// decodes as `DateTime<Utc>`.
pub(crate) const SQL_NOW: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Create a connection pool from a database URL.
///
/// Foreign keys are enforced on every connection; the database file is
/// created when missing. Writers queue behind each other for up to
/// [`BUSY_TIMEOUT`].
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Create a migrated, uniquely named in-memory database.
///
/// Each call gets its own database keyed by a fresh UUID, so tests never
/// see each other's rows. The pool holds a single connection that is never
/// reaped; the database lives exactly as long as the pool.
pub async fn create_isolated_pool() -> Result<DbPool, sqlx::Error> {
    let name = format!("forum-test-{}", uuid::Uuid::new_v4());
    let options =
        SqliteConnectOptions::from_str(&format!("sqlite:file:{name}?mode=memory&cache=shared"))?
            .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    tracing::debug!(database = %name, "Isolated test database ready");
    Ok(pool)
}

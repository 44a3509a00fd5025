use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, trace};

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const PG_POOL_MAX: u32 = 10;
const SQLITE_FILE_POOL_MAX: u32 = 4;
const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

fn is_sqlite_url(url: &str) -> bool {
    url.starts_with("sqlite:")
}

fn is_sqlite_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Session statements applied to every new pooled connection.
fn session_statements(sqlite: bool) -> Vec<String> {
    if sqlite {
        vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS};"),
        ]
    } else {
        vec![
            "SET application_name = 'turnstile-backend';".to_string(),
            "SET timezone = 'UTC';".to_string(),
        ]
    }
}

/// Open a pool for `profile` using `owner` credentials.
/// This function does NOT run any migrations.
pub async fn connect_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;

    if is_sqlite_url(&url) {
        connect_sqlite(&url).await
    } else {
        connect_postgres(&url).await
    }
}

async fn connect_sqlite(url: &str) -> Result<DatabaseConnection, AppError> {
    let connect_opts = SqliteConnectOptions::from_str(url)
        .map_err(|e| AppError::config(format!("invalid SQLite connection options: {e}")))?
        .create_if_missing(true);

    // Every connection to `sqlite::memory:` is its own database, so an
    // in-memory pool must keep exactly one connection alive forever.
    let memory = is_sqlite_memory_url(url);
    let max = if memory { 1 } else { SQLITE_FILE_POOL_MAX };

    let pool = SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(max)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(if memory { None } else { Some(Duration::from_secs(60)) })
        .max_lifetime(if memory { None } else { Some(Duration::from_secs(30 * 60)) })
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                for stmt in session_statements(true) {
                    sqlx::query(&stmt).execute(&mut *conn).await?;
                }
                trace!("db=sqlite hook=after_connect ok");
                Ok::<_, sqlx::Error>(())
            })
        })
        .connect_with(connect_opts)
        .await
        .map_err(|e| AppError::config(format!("failed to create SQLite connection pool: {e}")))?;

    info!(
        "pool=create engine=sqlite memory={} max={} acquire_timeout_ms={}",
        memory,
        max,
        ACQUIRE_TIMEOUT.as_millis()
    );
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

async fn connect_postgres(url: &str) -> Result<DatabaseConnection, AppError> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(PG_POOL_MAX)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(Duration::from_secs(30))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                for stmt in session_statements(false) {
                    sqlx::query(&stmt).execute(&mut *conn).await?;
                }
                Ok::<_, sqlx::Error>(())
            })
        })
        .connect(url)
        .await
        .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))?;

    info!(
        "pool=create engine=postgres max={} acquire_timeout_ms={}",
        PG_POOL_MAX,
        ACQUIRE_TIMEOUT.as_millis()
    );
    Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
}

async fn migrate_up(conn: &DatabaseConnection) -> Result<(), AppError> {
    migrate(conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))
}

/// Connect and bring the schema up to date; the single entrypoint used by
/// the server and tests.
///
/// Postgres profiles migrate over a short-lived owner connection and then
/// hand back an application-credential pool. The in-memory profile has to
/// migrate on the very pool it returns.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    if profile == DbProfile::InMemory {
        let conn = connect_db(profile, DbOwner::App).await?;
        migrate_up(&conn).await?;
        return Ok(conn);
    }

    let owner = connect_db(profile, DbOwner::Owner).await?;
    migrate_up(&owner).await?;
    owner
        .close()
        .await
        .map_err(|e| AppError::config(format!("failed to close owner pool: {e}")))?;

    connect_db(profile, DbOwner::App).await
}

/// Connect to (creating if needed) a SQLite database file and migrate it.
///
/// Unlike `sqlite::memory:`, a file store is served by a multi-connection
/// pool, so concurrent transactions really contend for the write lock.
pub async fn bootstrap_sqlite_file(path: &Path) -> Result<DatabaseConnection, AppError> {
    let url = format!("sqlite://{}", path.display());
    let conn = connect_sqlite(&url).await?;
    migrate_up(&conn).await?;
    Ok(conn)
}

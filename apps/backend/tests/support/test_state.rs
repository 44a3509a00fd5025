use std::env;
use std::path::Path;

use backend_test_support::unique_helpers::unique_str;
use turnstile_backend::config::db::DbProfile;
use turnstile_backend::infra::state::build_state;
use turnstile_backend::state::app_state::AppState;
use turnstile_backend::AppError;

const DB_KIND_VAR: &str = "TURNSTILE_TEST_DB_KIND";

/// Store behind `build_test_state`, chosen by `TURNSTILE_TEST_DB_KIND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestDbKind {
    /// Single-connection `sqlite::memory:` (default)
    Memory,
    /// One SQLite file per test under cargo's target tmp dir, pooled
    SqliteFile,
}

pub fn resolve_test_db_kind() -> Result<TestDbKind, AppError> {
    match env::var(DB_KIND_VAR) {
        Err(_) => Ok(TestDbKind::Memory),
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" | "memory" => Ok(TestDbKind::Memory),
            "sqlite-file" | "file" => Ok(TestDbKind::SqliteFile),
            other => Err(AppError::config(format!(
                "{DB_KIND_VAR} must be 'memory' or 'sqlite-file', got '{other}'"
            ))),
        },
    }
}

/// Fresh application state over a private, migrated database.
pub async fn build_test_state() -> Result<AppState, AppError> {
    match resolve_test_db_kind()? {
        TestDbKind::Memory => build_state().with_db(DbProfile::InMemory).build().await,
        TestDbKind::SqliteFile => build_sqlite_file_state().await,
    }
}

/// Private SQLite file served by a multi-connection pool, for tests whose
/// transactions must actually overlap.
pub async fn build_sqlite_file_state() -> Result<AppState, AppError> {
    let path = Path::new(env!("CARGO_TARGET_TMPDIR")).join(format!("{}.db", unique_str("turnstile")));
    build_state().with_sqlite_file(path).build().await
}

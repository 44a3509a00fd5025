use std::env;

use crate::error::AppError;

/// Which database the process talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
    /// Private single-connection SQLite memory database (tests, local runs)
    InMemory,
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// SQLite URL used by [`DbProfile::InMemory`]
pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

impl DbProfile {
    /// Parse a profile name as accepted by `TURNSTILE_DB_PROFILE`.
    pub fn from_name(name: &str) -> Result<Self, AppError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "prod" => Ok(DbProfile::Prod),
            "test" => Ok(DbProfile::Test),
            "memory" | "inmemory" | "in-memory" => Ok(DbProfile::InMemory),
            other => Err(AppError::config(format!(
                "Unknown database profile '{other}' (expected prod, test or memory)"
            ))),
        }
    }

    /// Profile selected by `TURNSTILE_DB_PROFILE`, defaulting to `Prod`.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("TURNSTILE_DB_PROFILE") {
            Ok(name) => Self::from_name(&name),
            Err(_) => Ok(DbProfile::Prod),
        }
    }
}

/// Builds a database URL from environment variables based on profile and owner.
///
/// `DATABASE_URL` overrides the Postgres parts for `Prod` and `Test`.
pub fn db_url(profile: DbProfile, owner: DbOwner) -> Result<String, AppError> {
    if profile == DbProfile::InMemory {
        return Ok(SQLITE_MEMORY_URL.to_string());
    }

    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }

    let host = host();
    let port = port();
    let db_name = db_name(profile)?;
    let (username, password) = credentials(owner)?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
        DbProfile::InMemory => Ok(SQLITE_MEMORY_URL.to_string()),
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("TURNSTILE_OWNER_USER")?,
            must_var("TURNSTILE_OWNER_PASSWORD")?,
        )),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

use std::path::PathBuf;

use tracing::info;

use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::{bootstrap_db, bootstrap_sqlite_file};
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Debug, Default)]
pub struct StateBuilder {
    db_profile: Option<DbProfile>,
    sqlite_file: Option<PathBuf>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Use a SQLite file instead of a profile's database; the state reports
    /// the `Test` profile.
    pub fn with_sqlite_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sqlite_file = Some(path.into());
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some(path) = self.sqlite_file {
            let conn = bootstrap_sqlite_file(&path).await?;
            info!(path = %path.display(), "state=ready db=sqlite-file");
            return Ok(AppState::new(conn, DbProfile::Test));
        }

        match self.db_profile {
            Some(profile) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(profile).await?;
                info!(profile = ?profile, "state=ready db=connected");
                Ok(AppState::new(conn, profile))
            }
            None => Ok(AppState::without_db()),
        }
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

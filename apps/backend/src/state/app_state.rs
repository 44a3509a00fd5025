use sea_orm::DatabaseConnection;

use crate::config::db::DbProfile;

/// Application state shared by every worker
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent only in tests that never touch the store)
    db: Option<DatabaseConnection>,
    /// Profile the connection was opened with
    db_profile: Option<DbProfile>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, profile: DbProfile) -> Self {
        Self {
            db: Some(db),
            db_profile: Some(profile),
        }
    }

    pub fn without_db() -> Self {
        Self {
            db: None,
            db_profile: None,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn db_profile(&self) -> Option<DbProfile> {
        self.db_profile
    }
}

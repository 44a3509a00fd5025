//! DTOs for turns_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new turn. New turns always start unused.
#[derive(Debug, Clone)]
pub struct TurnCreate {
    pub turn: String,
    /// Override the creation timestamp (defaults to now)
    pub created_at: Option<OffsetDateTime>,
}

impl TurnCreate {
    pub fn new(turn: impl Into<String>) -> Self {
        Self {
            turn: turn.into(),
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

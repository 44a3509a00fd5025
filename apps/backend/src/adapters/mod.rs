//! SeaORM adapters for the three record kinds.
//!
//! Every function is generic over `ConnectionTrait` so the allocation path
//! can compose them inside one `DatabaseTransaction`. Adapter functions
//! return `DbErr`; the repos layer maps to `DomainError`.

use time::OffsetDateTime;

pub mod module_turns_sea;
pub mod modules_sea;
pub mod turns_sea;

/// Current UTC time truncated to whole seconds.
///
/// SQLite stores timestamps as RFC 3339 text and compares them as strings,
/// which is only chronological when no fractional part is written. Rows
/// created within the same second are ordered by id.
pub(crate) fn now_utc() -> OffsetDateTime {
    truncate_to_seconds(OffsetDateTime::now_utc())
}

pub(crate) fn truncate_to_seconds(ts: OffsetDateTime) -> OffsetDateTime {
    ts.replace_nanosecond(0).unwrap_or(ts)
}

//! Error codes for the Turnstile backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Turnstile backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Path identifier is not a positive integer
    InvalidId,
    /// Query string could not be parsed
    InvalidQuery,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Request body exceeds the configured limit
    PayloadTooLarge,

    // Resource Not Found
    ModuleNotFound,
    TurnNotFound,
    /// Every turn is already used
    NoTurnAvailable,
    LinkNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Lost the claim on every candidate turn to concurrent allocations
    AllocationRace,
    /// Module name already taken
    UniqueName,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,
    /// Write lock held by a concurrent transaction; retryable
    DbBusy,

    // System Errors
    DbError,
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,

    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidId => "INVALID_ID",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            // Resource Not Found
            Self::ModuleNotFound => "MODULE_NOT_FOUND",
            Self::TurnNotFound => "TURN_NOT_FOUND",
            Self::NoTurnAvailable => "NO_TURN_AVAILABLE",
            Self::LinkNotFound => "LINK_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::AllocationRace => "ALLOCATION_RACE",
            Self::UniqueName => "UNIQUE_NAME",
            Self::Conflict => "CONFLICT",
            Self::DbBusy => "DB_BUSY",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Default labels for records created without one.

pub const MODULE_PREFIX: &str = "MOD";
pub const TURN_PREFIX: &str = "TRN";

/// `MOD-<ordinal>`
pub fn module_name(ordinal: u64) -> String {
    format!("{MODULE_PREFIX}-{ordinal}")
}

/// `TRN-<ordinal>`
pub fn turn_label(ordinal: u64) -> String {
    format!("{TURN_PREFIX}-{ordinal}")
}

//! Domain layer: pure types and helpers with no I/O.

pub mod labels;
pub mod lookup;

pub use lookup::LookupKey;

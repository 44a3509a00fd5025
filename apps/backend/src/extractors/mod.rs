pub mod lookup;
pub mod query;
pub mod record_id;
pub mod validated_json;

pub use lookup::Lookup;
pub use query::query_config;
pub use record_id::RecordId;
pub use validated_json::{JsonLimit, ValidatedJson};

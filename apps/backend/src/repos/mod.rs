//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod module_turns;
pub mod modules;
pub mod turns;

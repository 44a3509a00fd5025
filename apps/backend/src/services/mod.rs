//! Service layer: orchestration over repos, one transaction per call.

pub mod assignment;
pub mod modules;
pub mod turns;

pub use assignment::AssignmentService;
pub use modules::ModuleService;
pub use turns::TurnService;

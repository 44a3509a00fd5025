pub mod module_turns;
pub mod modules;
pub mod turns;

pub use module_turns::Entity as ModuleTurns;
pub use module_turns::Model as ModuleTurn;
pub use modules::Entity as Modules;
pub use modules::Model as Module;
pub use turns::Entity as Turns;
pub use turns::Model as Turn;

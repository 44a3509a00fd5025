//! DTOs for modules_sea adapter.

/// DTO for creating a new module.
#[derive(Debug, Clone)]
pub struct ModuleCreate {
    pub name: String,
}

impl ModuleCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

//! Module service: work-station CRUD and the bulk link reset.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::domain::labels;
use crate::domain::LookupKey;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::module_turns::{self as links, Link};
use crate::repos::modules::{self, Module};
use crate::repos::turns::Turn;
use crate::utils::find_or_fail::find_or_not_found;

#[derive(Debug, Clone, Copy)]
pub struct ModuleService;

impl ModuleService {
    pub fn new() -> Self {
        Self
    }

    /// Create a module.
    ///
    /// Without a name the module is called `MOD-<count + 1>`, moving on to
    /// the next ordinal while that name is taken. An explicit name that is
    /// already in use is a `Conflict(UniqueName)`.
    pub async fn create<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: Option<String>,
    ) -> Result<Module, DomainError> {
        let name = match name {
            Some(name) => {
                self.ensure_name_free(conn, &name, None).await?;
                name
            }
            None => self.next_default_name(conn).await?,
        };

        let module = modules::create(conn, &name).await?;
        info!(module_id = module.id, name = %module.name, "module created");
        Ok(module)
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Module>, DomainError> {
        modules::list(conn).await
    }

    /// Every module paired with the turn it currently holds.
    pub async fn list_with_turn<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<(Module, Option<Turn>)>, DomainError> {
        links::list_modules_with_turn(conn).await
    }

    pub async fn find<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        key: &LookupKey,
    ) -> Result<Module, DomainError> {
        let detail = format!("Module {key} not found");
        match key {
            LookupKey::ById(id) => {
                find_or_not_found(modules::find_by_id(conn, *id), NotFoundKind::Module, detail)
                    .await
            }
            LookupKey::ByLabel(name) => {
                find_or_not_found(modules::find_by_name(conn, name), NotFoundKind::Module, detail)
                    .await
            }
        }
    }

    /// The module's current link, with its turn.
    pub async fn current_turn<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        module_id: i64,
    ) -> Result<Link, DomainError> {
        self.find(conn, &LookupKey::ById(module_id)).await?;
        find_or_not_found(
            links::find_by_module_with_turn(conn, module_id),
            NotFoundKind::Link,
            format!("Module {module_id} holds no turn"),
        )
        .await
    }

    /// Rename a module; `None` leaves it untouched.
    pub async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        module_id: i64,
        name: Option<String>,
    ) -> Result<Module, DomainError> {
        let Some(name) = name else {
            debug!(module_id, "module update without changes");
            return self.find(conn, &LookupKey::ById(module_id)).await;
        };

        self.ensure_name_free(conn, &name, Some(module_id)).await?;

        let module = find_or_not_found(
            modules::update_name(conn, module_id, &name),
            NotFoundKind::Module,
            format!("Module {module_id} not found"),
        )
        .await?;
        info!(module_id, name = %module.name, "module renamed");
        Ok(module)
    }

    pub async fn remove<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        module_id: i64,
    ) -> Result<(), DomainError> {
        if modules::delete(conn, module_id).await? == 0 {
            return Err(DomainError::not_found(
                NotFoundKind::Module,
                format!("Module {module_id} not found"),
            ));
        }
        info!(module_id, "module removed");
        Ok(())
    }

    /// Delete every module (links cascade); returns the number removed.
    pub async fn remove_all<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<u64, DomainError> {
        let removed = modules::delete_all(conn).await?;
        info!(removed, "all modules removed");
        Ok(removed)
    }

    /// Drop every module-turn link. Turns keep their `used` flag.
    pub async fn remove_all_links<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<u64, DomainError> {
        let removed = links::delete_all(conn).await?;
        info!(removed, "all module links removed");
        Ok(removed)
    }

    async fn ensure_name_free<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
        except_module_id: Option<i64>,
    ) -> Result<(), DomainError> {
        match modules::find_by_name(conn, name).await? {
            Some(existing) if Some(existing.id) != except_module_id => {
                Err(DomainError::conflict(
                    ConflictKind::UniqueName,
                    format!("Module name '{name}' already in use"),
                ))
            }
            _ => Ok(()),
        }
    }

    async fn next_default_name<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<String, DomainError> {
        let mut ordinal = modules::count(conn).await? + 1;
        loop {
            let candidate = labels::module_name(ordinal);
            if modules::find_by_name(conn, &candidate).await?.is_none() {
                return Ok(candidate);
            }
            ordinal += 1;
        }
    }
}

impl Default for ModuleService {
    fn default() -> Self {
        Self::new()
    }
}

//! JSON shapes returned by the HTTP API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::repos::module_turns::Link;
use crate::repos::modules::Module;
use crate::repos::turns::Turn;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnResponse {
    pub id: i64,
    pub turn: String,
    pub used: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Turn> for TurnResponse {
    fn from(turn: Turn) -> Self {
        Self {
            id: turn.id,
            turn: turn.label,
            used: turn.used,
            created_at: turn.created_at,
            updated_at: turn.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleResponse {
    pub id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Module> for ModuleResponse {
    fn from(module: Module) -> Self {
        Self {
            id: module.id,
            name: module.name,
            created_at: module.created_at,
            updated_at: module.updated_at,
        }
    }
}

/// A module and the turn it currently holds (`null` when unlinked)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleWithTurnResponse {
    #[serde(flatten)]
    pub module: ModuleResponse,
    pub turn: Option<TurnResponse>,
}

impl From<(Module, Option<Turn>)> for ModuleWithTurnResponse {
    fn from((module, turn): (Module, Option<Turn>)) -> Self {
        Self {
            module: module.into(),
            turn: turn.map(TurnResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkResponse {
    pub id: i64,
    pub module_id: i64,
    pub turn_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub turn: Option<TurnResponse>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            module_id: link.module_id,
            turn_id: link.turn_id,
            created_at: link.created_at,
            turn: link.turn.map(TurnResponse::from),
        }
    }
}

/// Body of `POST /module` and `PATCH /module/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleInput {
    #[serde(default)]
    pub name: Option<String>,
}

impl ModuleInput {
    /// The requested name, with blank names treated as absent.
    pub fn name(self) -> Option<String> {
        self.name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

/// `?used=` filter / override
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UsedQuery {
    pub used: Option<bool>,
}

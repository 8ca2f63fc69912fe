use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::EntityId;
use super::null_as_default;

/// A role record as served by `/roles`.
///
/// `permissions` lists permission *names* in display order. The names are
/// references into the permission collection and are never validated, so a
/// role may name a permission that no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for POST /roles and PUT /roles/{id}.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

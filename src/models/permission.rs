use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::EntityId;
use super::null_as_default;

/// A permission record as served by `/permissions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for POST /permissions and PUT /permissions/{id}.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PermissionForm {
    pub name: String,
    pub description: String,
}

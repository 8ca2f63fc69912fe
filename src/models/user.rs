use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::EntityId;
use super::null_as_default;

/// Account status. Anything other than `Active`/`Inactive` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    Active,
    Inactive,
    Other(String),
}

impl From<String> for UserStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => UserStatus::Active,
            "Inactive" => UserStatus::Inactive,
            _ => UserStatus::Other(s),
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => "Active".to_string(),
            UserStatus::Inactive => "Inactive".to_string(),
            UserStatus::Other(s) => s,
        }
    }
}

/// A user record as served by `/users`.
///
/// `role` is the *name* of a role, used as a join key against `Role::name`.
/// Profile fields this crate does not model are carried in `extra` so that
/// a record survives a read-modify-write cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn is_active(&self) -> bool {
        matches!(self.status, Some(UserStatus::Active))
    }
}

/// Body for POST /users and PUT /users/{id}.
#[derive(Debug, Clone, Serialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

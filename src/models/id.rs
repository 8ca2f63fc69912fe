use serde::{Deserialize, Serialize};
use std::fmt;

/// Record identifier as returned by the API.
///
/// The backing json-server hands out numbers for seeded records and strings
/// for records created through POST, so both shapes are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Numeric form required by the bulk endpoints.
    /// Strings qualify only when they parse as an integer after trimming.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            EntityId::Number(n) => Some(*n),
            EntityId::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId::Text(s)
    }
}

//! Payloads carried by the live event stream.
//!
//! Each message is JSON `{type, path, data}`. It is resolved here, once, into
//! a [`LiveEvent`]; nothing downstream looks at the raw strings again.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::models::{Collection, Permission, Resource, Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Full or partial seed carried by an `INITIAL` event.
/// Slots left out keep whatever the store already holds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub roles: Option<Vec<Role>>,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    Initial(Snapshot),
    /// `collection` is the complete new contents of one resource, not a diff.
    Changed {
        kind: ChangeKind,
        collection: Collection,
    },
    /// Unrecognised `type`; carries the type for logging.
    Ignored(String),
}

#[derive(Debug)]
pub enum EventError {
    Malformed(serde_json::Error),
    UnroutablePath(String),
    BadData {
        kind: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::Malformed(e) => write!(f, "Malformed event payload: {e}"),
            EventError::UnroutablePath(p) => write!(f, "Event path {p:?} names no known collection"),
            EventError::BadData { kind, source } => write!(f, "Bad data for {kind} event: {source}"),
        }
    }
}

impl std::error::Error for EventError {}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    path: String,
    #[serde(default)]
    data: Value,
}

impl LiveEvent {
    pub fn decode(payload: &str) -> Result<LiveEvent, EventError> {
        let raw: RawEvent = serde_json::from_str(payload).map_err(EventError::Malformed)?;
        let kind = match raw.kind.as_str() {
            "INITIAL" => {
                let snapshot = serde_json::from_value(raw.data).map_err(|source| {
                    EventError::BadData { kind: raw.kind.clone(), source }
                })?;
                return Ok(LiveEvent::Initial(snapshot));
            }
            "CREATED" => ChangeKind::Created,
            "UPDATED" => ChangeKind::Updated,
            "DELETED" => ChangeKind::Deleted,
            _ => return Ok(LiveEvent::Ignored(raw.kind.clone())),
        };
        let resource =
            Resource::from_path(&raw.path).ok_or_else(|| EventError::UnroutablePath(raw.path.clone()))?;
        let collection = Collection::decode(resource, raw.data)
            .map_err(|source| EventError::BadData { kind: raw.kind, source })?;
        Ok(LiveEvent::Changed { kind, collection })
    }
}

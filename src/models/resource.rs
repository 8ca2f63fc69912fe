use serde::Serialize;
use serde_json::Value;

use super::{Permission, Role, User};

/// The three collections the console mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Roles,
    Permissions,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Users, Resource::Roles, Resource::Permissions];

    /// Path segment on the REST API.
    pub fn segment(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Roles => "roles",
            Resource::Permissions => "permissions",
        }
    }

    fn needle(self) -> &'static str {
        match self {
            Resource::Users => "/users",
            Resource::Roles => "/roles",
            Resource::Permissions => "/permissions",
        }
    }

    /// Route an event path to a collection by substring containment.
    /// Checked in `ALL` order; the first match wins.
    pub fn from_path(path: &str) -> Option<Resource> {
        Resource::ALL.into_iter().find(|r| path.contains(r.needle()))
    }
}

/// A whole replacement collection for one resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Users(Vec<User>),
    Roles(Vec<Role>),
    Permissions(Vec<Permission>),
}

impl Collection {
    pub fn resource(&self) -> Resource {
        match self {
            Collection::Users(_) => Resource::Users,
            Collection::Roles(_) => Resource::Roles,
            Collection::Permissions(_) => Resource::Permissions,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Users(v) => v.len(),
            Collection::Roles(v) => v.len(),
            Collection::Permissions(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode `data` as the collection for `resource`.
    pub fn decode(resource: Resource, data: Value) -> serde_json::Result<Collection> {
        Ok(match resource {
            Resource::Users => Collection::Users(serde_json::from_value(data)?),
            Resource::Roles => Collection::Roles(serde_json::from_value(data)?),
            Resource::Permissions => Collection::Permissions(serde_json::from_value(data)?),
        })
    }
}

pub mod id;
pub mod permission;
pub mod resource;
pub mod role;
pub mod user;

use serde::{Deserialize, Deserializer};

pub use id::EntityId;
pub use permission::{Permission, PermissionForm};
pub use resource::{Collection, Resource};
pub use role::{Role, RoleForm};
pub use user::{User, UserForm, UserStatus};

/// Treat an explicit `null` like a missing field. Pair with `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

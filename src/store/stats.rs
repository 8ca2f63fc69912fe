//! Aggregates for the dashboard, derived from the three collections.
//!
//! Everything here is a pure function of its inputs: the store calls it after
//! every write and never edits the results on its own.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Permission, Role, User};

/// Label used for users that carry no role name.
pub const UNASSIGNED_ROLE: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: usize,
    pub active_roles: usize,
    pub total_permissions: usize,
    pub active_sessions: usize,
}

/// Bar chart row: how many permissions a role lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePermissionCount {
    pub name: String,
    pub permissions: usize,
}

/// Pie chart slice: how many roles list a permission name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionUsage {
    pub name: String,
    pub value: usize,
}

/// Bar chart row: how many users are assigned a role name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRoleCount {
    pub name: String,
    pub users: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub stats: Stats,
    pub role_permissions: Vec<RolePermissionCount>,
    pub permission_usage: Vec<PermissionUsage>,
    pub user_roles: Vec<UserRoleCount>,
}

pub fn derive(users: &[User], roles: &[Role], permissions: &[Permission]) -> Stats {
    Stats {
        total_users: users.len(),
        active_roles: roles.len(),
        total_permissions: permissions.len(),
        active_sessions: users.iter().filter(|u| u.is_active()).count(),
    }
}

pub fn dashboard(users: &[User], roles: &[Role], permissions: &[Permission]) -> DashboardData {
    DashboardData {
        stats: derive(users, roles, permissions),
        role_permissions: role_permission_counts(roles),
        permission_usage: permission_usage(roles),
        user_roles: user_role_counts(users),
    }
}

pub fn role_permission_counts(roles: &[Role]) -> Vec<RolePermissionCount> {
    roles
        .iter()
        .map(|r| RolePermissionCount {
            name: r.name.clone(),
            permissions: r.permissions.len(),
        })
        .collect()
}

/// Counts every occurrence, so a role listing a name twice counts twice.
pub fn permission_usage(roles: &[Role]) -> Vec<PermissionUsage> {
    count_in_order(roles.iter().flat_map(|r| r.permissions.iter().map(String::as_str)))
        .into_iter()
        .map(|(name, value)| PermissionUsage { name, value })
        .collect()
}

pub fn user_role_counts(users: &[User]) -> Vec<UserRoleCount> {
    count_in_order(users.iter().map(|u| u.role.as_deref().unwrap_or(UNASSIGNED_ROLE)))
        .into_iter()
        .map(|(name, users)| UserRoleCount { name, users })
        .collect()
}

/// Tally keys, keeping the order in which each key was first seen.
fn count_in_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }
    counts
}

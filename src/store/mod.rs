//! Shared state for one console session: the three mirrored collections and
//! the stats derived from them.
//!
//! Every write replaces a whole slot and recomputes the stats while holding
//! the lock, so a reader never sees a collection and stats that disagree.

pub mod stats;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Collection, Permission, Resource, Role, User};
use crate::sync::event::{LiveEvent, Snapshot};
use stats::{DashboardData, Stats};

/// Per-slot write counters. Bumped on every replacement of that slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Revisions {
    pub users: u64,
    pub roles: u64,
    pub permissions: u64,
}

impl Revisions {
    pub fn get(&self, resource: Resource) -> u64 {
        match resource {
            Resource::Users => self.users,
            Resource::Roles => self.roles,
            Resource::Permissions => self.permissions,
        }
    }

    fn bump(&mut self, resource: Resource) {
        match resource {
            Resource::Users => self.users += 1,
            Resource::Roles => self.roles += 1,
            Resource::Permissions => self.permissions += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub stats: Stats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub revisions: Revisions,
    pub last_event_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreState {
    users: Vec<User>,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    stats: Stats,
    revisions: Revisions,
    last_event_at: Option<DateTime<Utc>>,
}

impl StoreState {
    fn put(&mut self, collection: Collection) {
        let resource = collection.resource();
        match collection {
            Collection::Users(v) => self.users = v,
            Collection::Roles(v) => self.roles = v,
            Collection::Permissions(v) => self.permissions = v,
        }
        self.revisions.bump(resource);
    }

    /// Replace the slots present in `snapshot`; absent slots keep their data.
    fn put_snapshot(&mut self, snapshot: Snapshot) {
        if let Some(users) = snapshot.users {
            self.put(Collection::Users(users));
        }
        if let Some(roles) = snapshot.roles {
            self.put(Collection::Roles(roles));
        }
        if let Some(permissions) = snapshot.permissions {
            self.put(Collection::Permissions(permissions));
        }
    }

    fn refresh_stats(&mut self) {
        self.stats = stats::derive(&self.users, &self.roles, &self.permissions);
    }
}

/// Cloneable handle to the session's state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ---------- Reads ----------

    pub fn users(&self) -> Vec<User> {
        self.read().users.clone()
    }

    pub fn roles(&self) -> Vec<Role> {
        self.read().roles.clone()
    }

    pub fn permissions(&self) -> Vec<Permission> {
        self.read().permissions.clone()
    }

    pub fn stats(&self) -> Stats {
        self.read().stats
    }

    /// Stats plus chart groupings, all from the same instant.
    pub fn dashboard(&self) -> DashboardData {
        let state = self.read();
        stats::dashboard(&state.users, &state.roles, &state.permissions)
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.read();
        StoreSnapshot {
            users: state.users.clone(),
            roles: state.roles.clone(),
            permissions: state.permissions.clone(),
            stats: state.stats,
        }
    }

    pub fn revisions(&self) -> Revisions {
        self.read().revisions
    }

    pub fn revision(&self, resource: Resource) -> u64 {
        self.read().revisions.get(resource)
    }

    /// When the last live event was applied, if any.
    pub fn last_event_at(&self) -> Option<DateTime<Utc>> {
        self.read().last_event_at
    }

    pub fn sync_status(&self) -> SyncStatus {
        let state = self.read();
        SyncStatus {
            revisions: state.revisions,
            last_event_at: state.last_event_at,
        }
    }

    // ---------- Writes ----------

    pub fn set_users(&self, users: Vec<User>) {
        self.replace(Collection::Users(users));
    }

    pub fn set_roles(&self, roles: Vec<Role>) {
        self.replace(Collection::Roles(roles));
    }

    pub fn set_permissions(&self, permissions: Vec<Permission>) {
        self.replace(Collection::Permissions(permissions));
    }

    pub fn replace(&self, collection: Collection) {
        let mut state = self.write();
        state.put(collection);
        state.refresh_stats();
    }

    /// Replace the slots present in `snapshot`; absent slots keep their data.
    pub fn apply_snapshot(&self, snapshot: Snapshot) {
        let mut state = self.write();
        state.put_snapshot(snapshot);
        state.refresh_stats();
    }

    /// Apply a decoded live event. Returns false when the event carried no
    /// state (unknown type). The slot, stats and event time change together.
    pub fn apply_event(&self, event: LiveEvent) -> bool {
        let mut state = self.write();
        match event {
            LiveEvent::Initial(snapshot) => state.put_snapshot(snapshot),
            LiveEvent::Changed { collection, .. } => state.put(collection),
            LiveEvent::Ignored(_) => return false,
        }
        state.refresh_stats();
        state.last_event_at = Some(Utc::now());
        true
    }

    /// Seed from the initial bulk fetch.
    ///
    /// `since` is the revision set captured before the fetch started. A slot
    /// written in the meantime (by a live event or a setter) holds newer data
    /// than the fetch and is left alone. Returns the slots that were skipped.
    pub fn seed(
        &self,
        since: Revisions,
        users: Vec<User>,
        roles: Vec<Role>,
        permissions: Vec<Permission>,
    ) -> Vec<Resource> {
        let mut state = self.write();
        let mut skipped = Vec::new();
        for collection in [
            Collection::Users(users),
            Collection::Roles(roles),
            Collection::Permissions(permissions),
        ] {
            let resource = collection.resource();
            if state.revisions.get(resource) == since.get(resource) {
                state.put(collection);
            } else {
                skipped.push(resource);
            }
        }
        state.refresh_stats();
        skipped
    }
}

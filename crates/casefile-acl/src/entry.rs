//! Access control entries.
//!
//! An [`AccessControlEntry`] grants one actor, or the public, a set of
//! [`Permissions`] on exactly one resource.

use casefile_core::{ActorId, ResourceKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Independent read/write/delete flags of a grant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    /// May view the resource.
    pub read: bool,
    /// May modify the resource.
    pub write: bool,
    /// May delete the resource. Not consulted by the evaluator.
    pub delete: bool,
}

impl Permissions {
    /// No permissions at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Read access only.
    pub fn read_only() -> Self {
        Self {
            read: true,
            ..Self::default()
        }
    }

    /// Read and write access.
    pub fn read_write() -> Self {
        Self {
            read: true,
            write: true,
            delete: false,
        }
    }

    /// Every permission.
    pub fn all() -> Self {
        Self {
            read: true,
            write: true,
            delete: true,
        }
    }
}

/// One grant attached to one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlEntry {
    /// Row id.
    pub id: Uuid,
    /// Resource the grant is attached to.
    pub resource: ResourceKey,
    /// Grantee; `None` is the public sentinel.
    pub actor: Option<ActorId>,
    /// Read flag.
    pub permission_read: bool,
    /// Write flag.
    pub permission_write: bool,
    /// Delete flag.
    pub permission_delete: bool,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last mutation time.
    pub updated: DateTime<Utc>,
}

impl AccessControlEntry {
    /// Creates a new entry stamped with the current time.
    pub fn new(resource: ResourceKey, actor: Option<ActorId>, permissions: Permissions) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            resource,
            actor,
            permission_read: permissions.read,
            permission_write: permissions.write,
            permission_delete: permissions.delete,
            created: now,
            updated: now,
        }
    }

    /// Returns `true` if this is the public entry of its resource.
    pub fn is_public(&self) -> bool {
        self.actor.is_none()
    }

    /// Returns `true` if this entry is keyed by `(resource, actor)`.
    pub fn matches(&self, resource: &ResourceKey, actor: Option<&ActorId>) -> bool {
        &self.resource == resource && self.actor.as_ref() == actor
    }

    /// The entry's flags as a [`Permissions`] value.
    pub fn permissions(&self) -> Permissions {
        Permissions {
            read: self.permission_read,
            write: self.permission_write,
            delete: self.permission_delete,
        }
    }

    /// Overwrites all three flags.
    pub fn set_permissions(&mut self, permissions: Permissions) {
        self.permission_read = permissions.read;
        self.permission_write = permissions.write;
        self.permission_delete = permissions.delete;
    }

    /// Moves the `updated` timestamp to now.
    pub(crate) fn touch(&mut self) {
        self.updated = Utc::now();
    }
}

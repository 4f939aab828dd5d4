//! ACL storage.
//!
//! An [`AclStore`] persists [`AccessControlEntry`] records keyed by
//! `(resource, actor)`, where a `None` actor is the public sentinel. At most
//! one entry may exist per key.
//!
//! # Backends
//!
//! - [`MemoryAclStore`]: in-process store guarded by an async `RwLock`

mod memory;

pub use memory::MemoryAclStore;

use async_trait::async_trait;
use casefile_core::{ActorId, ResourceKey};

use crate::entry::{AccessControlEntry, Permissions};
use crate::error::Result;

/// Storage for access control entries.
///
/// Implementations must keep `(resource, actor)` unique, including under
/// concurrent [`upsert_read`](AclStore::upsert_read) calls.
#[async_trait]
pub trait AclStore: Send + Sync {
    /// Find the entry for `(resource, actor)`.
    ///
    /// Returns `Ok(None)` when there is no entry.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Integrity`](crate::Error::Integrity) if more than
    /// one entry matches.
    async fn find(
        &self,
        resource: &ResourceKey,
        actor: Option<&ActorId>,
    ) -> Result<Option<AccessControlEntry>>;

    /// Create a new entry.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DuplicateEntry`](crate::Error::DuplicateEntry) if
    /// an entry for `(resource, actor)` already exists.
    async fn create(
        &self,
        resource: &ResourceKey,
        actor: Option<&ActorId>,
        permissions: Permissions,
    ) -> Result<AccessControlEntry>;

    /// Persist the flags of a previously fetched entry.
    ///
    /// Moves the entry's `updated` timestamp and returns the stored entry.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) if the entry
    /// has been deleted in the meantime.
    async fn update(&self, entry: &AccessControlEntry) -> Result<AccessControlEntry>;

    /// Delete the entry for `(resource, actor)`.
    ///
    /// Returns whether an entry was removed; absence is not an error.
    async fn delete(&self, resource: &ResourceKey, actor: Option<&ActorId>) -> Result<bool>;

    /// All entries of a resource, in no particular order.
    async fn list(&self, resource: &ResourceKey) -> Result<Vec<AccessControlEntry>>;

    /// Atomically find-or-create the entry for `(resource, actor)` and set
    /// its read flag.
    ///
    /// A created entry has only the requested read flag. An existing entry
    /// that already carries the requested flag is returned untouched.
    /// The flag is `true` when the store was changed.
    async fn upsert_read(
        &self,
        resource: &ResourceKey,
        actor: Option<&ActorId>,
        read: bool,
    ) -> Result<(AccessControlEntry, bool)>;

    /// Delete every entry of a resource, returning how many were removed.
    ///
    /// Called when the resource itself is deleted.
    async fn purge(&self, resource: &ResourceKey) -> Result<usize>;
}

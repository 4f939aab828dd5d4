//! In-memory ACL store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use casefile_core::{ActorId, ResourceKey};
use tokio::sync::RwLock;

use super::AclStore;
use crate::entry::{AccessControlEntry, Permissions};
use crate::error::{Error, Result, grantee_label};

type Table = HashMap<ResourceKey, Vec<AccessControlEntry>>;

/// An in-memory ACL store.
///
/// Cheap to clone; clones share the same table. Every read-modify-write
/// runs under a single write guard, so `(resource, actor)` uniqueness holds
/// under concurrent callers.
#[derive(Clone, Default)]
pub struct MemoryAclStore {
    /// Entries, grouped by the resource they are attached to.
    entries: Arc<RwLock<Table>>,
}

impl MemoryAclStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given entries as-is.
    ///
    /// Used to restore a snapshot. No uniqueness check is made here;
    /// duplicated keys surface as integrity errors on lookup.
    pub fn from_entries(entries: impl IntoIterator<Item = AccessControlEntry>) -> Self {
        let mut table = Table::new();
        for entry in entries {
            table.entry(entry.resource.clone()).or_default().push(entry);
        }
        Self {
            entries: Arc::new(RwLock::new(table)),
        }
    }

    /// Snapshot of every stored entry.
    pub async fn entries(&self) -> Vec<AccessControlEntry> {
        self.entries
            .read()
            .await
            .values()
            .flat_map(|v| v.iter().cloned())
            .collect()
    }
}

impl std::fmt::Debug for MemoryAclStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAclStore").finish_non_exhaustive()
    }
}

/// Position of the single entry keyed by `(resource, actor)` in `entries`.
fn position(
    entries: &[AccessControlEntry],
    resource: &ResourceKey,
    actor: Option<&ActorId>,
) -> Result<Option<usize>> {
    let mut matches = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.matches(resource, actor))
        .map(|(i, _)| i);
    let first = matches.next();
    let extra = matches.count();
    if extra > 0 {
        let count = extra + 1;
        log::error!(
            "Found {count} ACL entries for {} on {resource}",
            grantee_label(actor)
        );
        return Err(Error::integrity(resource, actor, count));
    }
    Ok(first)
}

#[async_trait]
impl AclStore for MemoryAclStore {
    async fn find(
        &self,
        resource: &ResourceKey,
        actor: Option<&ActorId>,
    ) -> Result<Option<AccessControlEntry>> {
        let table = self.entries.read().await;
        let Some(entries) = table.get(resource) else {
            return Ok(None);
        };
        Ok(position(entries, resource, actor)?.map(|i| entries[i].clone()))
    }

    async fn create(
        &self,
        resource: &ResourceKey,
        actor: Option<&ActorId>,
        permissions: Permissions,
    ) -> Result<AccessControlEntry> {
        let mut table = self.entries.write().await;
        let entries = table.entry(resource.clone()).or_default();
        if entries.iter().any(|e| e.matches(resource, actor)) {
            return Err(Error::duplicate(resource, actor));
        }

        let entry = AccessControlEntry::new(resource.clone(), actor.cloned(), permissions);
        log::debug!(
            "Created ACL entry {} for {} on {resource}",
            entry.id,
            grantee_label(actor)
        );
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: &AccessControlEntry) -> Result<AccessControlEntry> {
        let mut table = self.entries.write().await;
        let stored = table
            .get_mut(&entry.resource)
            .and_then(|entries| entries.iter_mut().find(|e| e.id == entry.id))
            .ok_or_else(|| Error::not_found(&entry.resource, entry.actor.as_ref()))?;

        stored.set_permissions(entry.permissions());
        stored.touch();
        log::debug!("Updated ACL entry {}", stored.id);
        Ok(stored.clone())
    }

    async fn delete(&self, resource: &ResourceKey, actor: Option<&ActorId>) -> Result<bool> {
        let mut table = self.entries.write().await;
        let Some(entries) = table.get_mut(resource) else {
            return Ok(false);
        };
        let Some(index) = position(entries, resource, actor)? else {
            return Ok(false);
        };

        let removed = entries.swap_remove(index);
        if entries.is_empty() {
            table.remove(resource);
        }
        log::debug!(
            "Deleted ACL entry {} for {} on {resource}",
            removed.id,
            grantee_label(actor)
        );
        Ok(true)
    }

    async fn list(&self, resource: &ResourceKey) -> Result<Vec<AccessControlEntry>> {
        let table = self.entries.read().await;
        Ok(table.get(resource).cloned().unwrap_or_default())
    }

    async fn upsert_read(
        &self,
        resource: &ResourceKey,
        actor: Option<&ActorId>,
        read: bool,
    ) -> Result<(AccessControlEntry, bool)> {
        let mut table = self.entries.write().await;
        let entries = table.entry(resource.clone()).or_default();

        match position(entries, resource, actor)? {
            Some(index) => {
                let entry = &mut entries[index];
                if entry.permission_read == read {
                    return Ok((entry.clone(), false));
                }
                entry.permission_read = read;
                entry.touch();
                log::debug!("Set read={read} on ACL entry {}", entry.id);
                Ok((entry.clone(), true))
            }
            None => {
                let permissions = Permissions {
                    read,
                    ..Permissions::none()
                };
                let entry = AccessControlEntry::new(resource.clone(), actor.cloned(), permissions);
                log::debug!(
                    "Created ACL entry {} for {} on {resource}",
                    entry.id,
                    grantee_label(actor)
                );
                entries.push(entry.clone());
                Ok((entry, true))
            }
        }
    }

    async fn purge(&self, resource: &ResourceKey) -> Result<usize> {
        let removed = self
            .entries
            .write()
            .await
            .remove(resource)
            .map_or(0, |entries| entries.len());
        if removed > 0 {
            log::debug!("Purged {removed} ACL entries on {resource}");
        }
        Ok(removed)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Common test utilities and harness for casefile-acl integration tests.

use std::sync::Arc;

use casefile_acl::{AccessPolicy, AclConfig, AclStore, MemoryAclStore, Permissions, Protectable};
use casefile_core::ActorId;

/// Test harness for integration tests.
///
/// Owns a shared in-memory store and an evaluator over it.
pub struct TestHarness {
    /// Shared store
    pub store: Arc<MemoryAclStore>,
    /// Evaluator over `store`
    pub policy: AccessPolicy<MemoryAclStore>,
}

impl TestHarness {
    /// Creates a harness with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AclConfig::default())
    }

    /// Creates a harness with a custom configuration.
    pub fn with_config(config: AclConfig) -> Self {
        let store = Arc::new(MemoryAclStore::new());
        let policy = AccessPolicy::with_config(Arc::clone(&store), config);
        Self { store, policy }
    }

    /// Grants `actor` a personal entry on `resource`.
    pub async fn grant(&self, resource: &impl Protectable, actor: &str, permissions: Permissions) {
        self.store
            .create(&resource.resource_key(), Some(&ActorId::new(actor)), permissions)
            .await
            .expect("grant should succeed");
    }

    /// Number of public entries attached to `resource`.
    pub async fn public_entry_count(&self, resource: &impl Protectable) -> usize {
        self.store
            .list(&resource.resource_key())
            .await
            .unwrap()
            .iter()
            .filter(|e| e.is_public())
            .count()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for an actor id.
pub fn actor(name: &str) -> ActorId {
    ActorId::new(name)
}

//! Access evaluation.
//!
//! [`AccessPolicy`] answers three questions about a [`Protectable`]
//! resource (is it public, can an actor read it, can an actor write it) and
//! toggles publication. It keeps no ACL state of its own; every decision is
//! made over the current contents of the injected [`AclStore`].
//!
//! Decision order:
//!
//! - **read**: owner, then public entry, then the actor's personal entry
//! - **write**: owner, then the actor's personal entry
//!
//! Publication only ever affects read access.
//!
//! # Example
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use std::sync::Arc;
//! use casefile_acl::{AccessPolicy, MemoryAclStore, Sketch};
//! use casefile_core::ActorId;
//!
//! let policy = AccessPolicy::new(Arc::new(MemoryAclStore::new()));
//! let sketch = Sketch::new(1, "alice", "Incident 42");
//! let bob = ActorId::new("bob");
//!
//! assert!(!policy.can_read(&sketch, Some(&bob)).await?);
//! policy.make_public(&sketch, &ActorId::new("alice")).await?;
//! assert!(policy.can_read(&sketch, Some(&bob)).await?);
//! assert!(!policy.can_write(&sketch, Some(&bob)).await?);
//! # Ok::<(), casefile_acl::Error>(())
//! # }).unwrap();
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use casefile_core::ActorId;

use crate::config::{AclConfig, DenialMode};
use crate::error::{Error, Result};
use crate::resource::Protectable;
use crate::store::AclStore;

/// Stateless access evaluator over an ACL store.
pub struct AccessPolicy<S: AclStore + ?Sized> {
    store: Arc<S>,
    config: AclConfig,
}

impl<S: AclStore + ?Sized> Clone for AccessPolicy<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<S: AclStore + ?Sized> std::fmt::Debug for AccessPolicy<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: AclStore + ?Sized> AccessPolicy<S> {
    /// Create an evaluator with the default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, AclConfig::default())
    }

    /// Create an evaluator with an explicit configuration.
    pub fn with_config(store: Arc<S>, config: AclConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    /// Returns `true` if the resource carries a public entry with read set.
    pub async fn is_public<R: Protectable + ?Sized>(&self, resource: &R) -> Result<bool> {
        let entry = self.store.find(&resource.resource_key(), None).await?;
        Ok(entry.is_some_and(|e| e.permission_read))
    }

    /// Returns `true` if `actor` may read the resource.
    ///
    /// `None` is an anonymous caller, who can read exactly the public
    /// resources.
    pub async fn can_read<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: Option<&ActorId>,
    ) -> Result<bool> {
        let allowed = self.evaluate_read(resource, actor).await?;
        self.log_decision("read", resource, actor, allowed);
        Ok(allowed)
    }

    async fn evaluate_read<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: Option<&ActorId>,
    ) -> Result<bool> {
        if actor.is_some_and(|a| resource.is_owned_by(a)) {
            return Ok(true);
        }
        // A public resource is readable even when a personal entry says otherwise
        if self.is_public(resource).await? {
            return Ok(true);
        }
        let Some(actor) = actor else {
            return Ok(false);
        };
        let entry = self.store.find(&resource.resource_key(), Some(actor)).await?;
        Ok(entry.is_some_and(|e| e.permission_read))
    }

    /// Returns `true` if `actor` may modify the resource.
    ///
    /// Public status never grants write access.
    pub async fn can_write<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: Option<&ActorId>,
    ) -> Result<bool> {
        let allowed = self.evaluate_write(resource, actor).await?;
        self.log_decision("write", resource, actor, allowed);
        Ok(allowed)
    }

    async fn evaluate_write<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: Option<&ActorId>,
    ) -> Result<bool> {
        let Some(actor) = actor else {
            return Ok(false);
        };
        if resource.is_owned_by(actor) {
            return Ok(true);
        }
        let entry = self.store.find(&resource.resource_key(), Some(actor)).await?;
        Ok(entry.is_some_and(|e| e.permission_write))
    }

    /// Make the resource readable by everyone.
    ///
    /// Requires write access. Calling it on an already public resource
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// [`Error::PermissionDenied`] if `actor` cannot write the resource and
    /// the policy is configured with [`DenialMode::Reject`].
    pub async fn make_public<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: &ActorId,
    ) -> Result<()> {
        if !self.can_write(resource, Some(actor)).await? {
            return self.deny(resource, actor, "publish");
        }
        let key = resource.resource_key();
        let (entry, changed) = self.store.upsert_read(&key, None, true).await?;
        if changed {
            log::info!("{actor} made {key} public (entry {})", entry.id);
        }
        Ok(())
    }

    /// Remove public visibility from the resource.
    ///
    /// Requires write access. Personal grants are left in place.
    ///
    /// # Errors
    ///
    /// [`Error::PermissionDenied`] if `actor` cannot write the resource and
    /// the policy is configured with [`DenialMode::Reject`].
    pub async fn make_private<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: &ActorId,
    ) -> Result<()> {
        if !self.can_write(resource, Some(actor)).await? {
            return self.deny(resource, actor, "unpublish");
        }
        let key = resource.resource_key();
        if self.store.delete(&key, None).await? {
            log::info!("{actor} made {key} private");
        }
        Ok(())
    }

    /// Actors holding a personal entry on the resource, excluding the owner.
    pub async fn collaborators<R: Protectable + ?Sized>(
        &self,
        resource: &R,
    ) -> Result<BTreeSet<ActorId>> {
        let entries = self.store.list(&resource.resource_key()).await?;
        Ok(entries
            .into_iter()
            .filter_map(|e| e.actor)
            .filter(|actor| !resource.is_owned_by(actor))
            .collect())
    }

    /// Delete every ACL entry of a resource that is itself being deleted.
    pub async fn forget<R: Protectable + ?Sized>(&self, resource: &R) -> Result<usize> {
        self.store.purge(&resource.resource_key()).await
    }

    fn deny<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: &ActorId,
        access: &str,
    ) -> Result<()> {
        let key = resource.resource_key();
        match self.config.denials {
            DenialMode::Reject => Err(Error::permission_denied(&key, Some(actor), access)),
            DenialMode::Silent => {
                log::debug!("Ignored {access} of {key} by {actor}: no write access");
                Ok(())
            }
        }
    }

    fn log_decision<R: Protectable + ?Sized>(
        &self,
        access: &str,
        resource: &R,
        actor: Option<&ActorId>,
        allowed: bool,
    ) {
        let level = if self.config.log_decisions {
            log::Level::Info
        } else {
            log::Level::Debug
        };
        log::log!(
            level,
            "{access} {} by {}: {}",
            resource.resource_key(),
            actor.map_or("anonymous", ActorId::as_str),
            if allowed { "allowed" } else { "denied" }
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

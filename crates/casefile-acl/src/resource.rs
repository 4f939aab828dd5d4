//! Protected resources.
//!
//! Any entity whose visibility is governed by ACL entries implements
//! [`Protectable`]: it exposes the key its entries are stored under and the
//! actor that owns it.

use casefile_core::{ActorId, ResourceId, ResourceKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capability of a resource that carries an owner and an ACL.
pub trait Protectable: Send + Sync {
    /// Key under which the resource's ACL entries are stored.
    fn resource_key(&self) -> ResourceKey;

    /// The owning actor. Ownership confers full read and write access.
    fn owner(&self) -> &ActorId;

    /// Returns `true` if `actor` owns this resource.
    fn is_owned_by(&self, actor: &ActorId) -> bool {
        self.owner() == actor
    }
}

impl<T: Protectable + ?Sized> Protectable for &T {
    fn resource_key(&self) -> ResourceKey {
        (**self).resource_key()
    }

    fn owner(&self) -> &ActorId {
        (**self).owner()
    }
}

/// A reference to a protected resource by key and owner.
///
/// For callers that hold identifiers rather than loaded entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource key.
    pub key: ResourceKey,
    /// Owning actor.
    pub owner: ActorId,
}

impl ResourceRef {
    /// Creates a resource reference.
    pub fn new(key: ResourceKey, owner: impl Into<ActorId>) -> Self {
        Self {
            key,
            owner: owner.into(),
        }
    }
}

impl Protectable for ResourceRef {
    fn resource_key(&self) -> ResourceKey {
        self.key.clone()
    }

    fn owner(&self) -> &ActorId {
        &self.owner
    }
}

/// An investigation sketch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sketch {
    /// Row id.
    pub id: ResourceId,
    /// Owning actor.
    pub owner: ActorId,
    /// Title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Timelines added to this sketch.
    #[serde(default)]
    pub timelines: Vec<ResourceId>,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last mutation time.
    pub updated: DateTime<Utc>,
}

impl Sketch {
    /// Creates an empty sketch owned by `owner`.
    pub fn new(id: ResourceId, owner: impl Into<ActorId>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner: owner.into(),
            title: title.into(),
            description: String::new(),
            timelines: Vec::new(),
            created: now,
            updated: now,
        }
    }
}

impl Protectable for Sketch {
    fn resource_key(&self) -> ResourceKey {
        ResourceKey::sketch(self.id)
    }

    fn owner(&self) -> &ActorId {
        &self.owner
    }
}

/// An imported timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Row id.
    pub id: ResourceId,
    /// Owning actor.
    pub owner: ActorId,
    /// Title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Name of the datastore index holding the events.
    pub datastore_index: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last mutation time.
    pub updated: DateTime<Utc>,
}

impl Timeline {
    /// Creates a timeline owned by `owner` backed by `datastore_index`.
    pub fn new(
        id: ResourceId,
        owner: impl Into<ActorId>,
        title: impl Into<String>,
        datastore_index: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner: owner.into(),
            title: title.into(),
            description: String::new(),
            datastore_index: datastore_index.into(),
            created: now,
            updated: now,
        }
    }
}

impl Protectable for Timeline {
    fn resource_key(&self) -> ResourceKey {
        ResourceKey::timeline(self.id)
    }

    fn owner(&self) -> &ActorId {
        &self.owner
    }
}

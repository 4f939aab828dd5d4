//! Error types for casefile-acl

use casefile_core::{ActorId, ResourceKey};
use thiserror::Error;

/// Result type alias for casefile-acl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in casefile-acl
///
/// Absence of a grant is never an error for evaluator queries; it is
/// reported as `Ok(false)`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from casefile-core
    #[error("Core error: {0}")]
    Core(#[from] casefile_core::Error),

    /// No entry exists for the key
    #[error("No access control entry for {actor} on {resource}")]
    NotFound {
        /// Resource the lookup was for
        resource: ResourceKey,
        /// Actor the lookup was for, or "public"
        actor: String,
    },

    /// An entry already exists for the key
    #[error("Access control entry for {actor} on {resource} already exists")]
    DuplicateEntry {
        /// Resource the entry belongs to
        resource: ResourceKey,
        /// Actor of the entry, or "public"
        actor: String,
    },

    /// More than one entry matched a key that must be unique
    #[error("Integrity violation: {count} access control entries for {actor} on {resource}")]
    Integrity {
        /// Resource with corrupted entries
        resource: ResourceKey,
        /// Actor of the duplicated entries, or "public"
        actor: String,
        /// Number of matching entries
        count: usize,
    },

    /// The actor is not allowed to perform the operation
    #[error("{actor} may not {access} {resource}")]
    PermissionDenied {
        /// Resource the operation targeted
        resource: ResourceKey,
        /// Acting identity, or "anonymous"
        actor: String,
        /// Operation that was refused
        access: String,
    },
}

impl Error {
    /// Creates a not-found error for a key.
    pub fn not_found(resource: &ResourceKey, actor: Option<&ActorId>) -> Self {
        Error::NotFound {
            resource: resource.clone(),
            actor: grantee_label(actor),
        }
    }

    /// Creates a duplicate-entry error for a key.
    pub fn duplicate(resource: &ResourceKey, actor: Option<&ActorId>) -> Self {
        Error::DuplicateEntry {
            resource: resource.clone(),
            actor: grantee_label(actor),
        }
    }

    /// Creates an integrity error for a key that matched `count` entries.
    pub fn integrity(resource: &ResourceKey, actor: Option<&ActorId>, count: usize) -> Self {
        Error::Integrity {
            resource: resource.clone(),
            actor: grantee_label(actor),
            count,
        }
    }

    /// Creates a permission-denied error.
    pub fn permission_denied(
        resource: &ResourceKey,
        actor: Option<&ActorId>,
        access: impl Into<String>,
    ) -> Self {
        Error::PermissionDenied {
            resource: resource.clone(),
            actor: actor.map_or_else(|| "anonymous".to_string(), ToString::to_string),
            access: access.into(),
        }
    }

    /// Returns whether this error indicates corrupted ACL state.
    ///
    /// Fatal errors must abort the current operation; they are never
    /// resolved by picking one of the conflicting entries.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Integrity { .. })
    }
}

/// Label for an ACE grantee: the actor id, or `public` for the sentinel.
pub(crate) fn grantee_label(actor: Option<&ActorId>) -> String {
    actor.map_or_else(|| "public".to_string(), ToString::to_string)
}

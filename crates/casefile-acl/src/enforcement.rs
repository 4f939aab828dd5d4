//! Enforcement helpers.
//!
//! Turns negative access decisions into [`Error::PermissionDenied`] for
//! callers that guard an operation rather than branch on a boolean.

use std::fmt;

use casefile_core::ActorId;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::policy::AccessPolicy;
use crate::resource::Protectable;
use crate::store::AclStore;

/// Kind of access being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// View the resource.
    Read,
    /// Modify the resource.
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

impl<S: AclStore + ?Sized> AccessPolicy<S> {
    /// Returns `true` if `actor` has the requested access.
    pub async fn allows<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: Option<&ActorId>,
        access: Access,
    ) -> Result<bool> {
        match access {
            Access::Read => self.can_read(resource, actor).await,
            Access::Write => self.can_write(resource, actor).await,
        }
    }

    /// Require `access` to the resource.
    ///
    /// # Errors
    ///
    /// [`Error::PermissionDenied`] if the access is not granted, or any
    /// store error raised while deciding.
    pub async fn require<R: Protectable + ?Sized>(
        &self,
        resource: &R,
        actor: Option<&ActorId>,
        access: Access,
    ) -> Result<()> {
        if self.allows(resource, actor, access).await? {
            Ok(())
        } else {
            Err(Error::permission_denied(
                &resource.resource_key(),
                actor,
                access.to_string(),
            ))
        }
    }
}

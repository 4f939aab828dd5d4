//! # casefile-acl
//!
//! Access control for Casefile sketches and timelines.
//!
//! This crate implements the ACL system for Casefile:
//! - Access control entries: per-actor and public read/write/delete grants
//! - ACL storage keyed by `(resource, actor)` with atomic publication upsert
//! - Access evaluation (owner bypass, public read, personal grants)
//! - Enforcement helpers that turn denials into errors
//!
//! The evaluator is generic over any [`Protectable`] resource and any
//! [`AclStore`] backend; the store is injected, never global.

#![forbid(unsafe_code)]

pub mod config;
pub mod enforcement;
pub mod entry;
pub mod error;
pub mod policy;
mod proptests;
pub mod resource;
pub mod store;

pub use config::{AclConfig, DenialMode};
pub use enforcement::Access;
pub use entry::{AccessControlEntry, Permissions};
pub use error::{Error, Result};
pub use policy::AccessPolicy;
pub use resource::{Protectable, ResourceRef, Sketch, Timeline};
pub use store::{AclStore, MemoryAclStore};

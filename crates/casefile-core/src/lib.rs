//! Casefile Core — shared identity types, errors, and configuration loading.
//!
//! This crate provides the foundational types used across all Casefile crates.
//! It has no internal Casefile dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Actor and resource identifiers
//! - [`config`]: The [`ConfigManager`] trait for TOML-backed configuration

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod ids;
mod proptests;

// Re-export key types at crate root for convenience
pub use config::ConfigManager;
pub use error::{Error, Result};
pub use ids::{ActorId, KindName, ResourceId, ResourceKey, ResourceKind};

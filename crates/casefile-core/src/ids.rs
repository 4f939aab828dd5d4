//! Identifier types for actors and protected resources.
//!
//! Actors are identified by an opaque, stable account key. Resources are
//! identified by a [`ResourceKey`]: the kind of entity plus its row id, so
//! that one ACL table can serve every protected entity type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Separator between the kind and id in the text form of a [`ResourceKey`].
const KEY_SEPARATOR: char = ':';

// ============================================================================
// ActorId
// ============================================================================

/// Stable identity of an actor (a user account).
///
/// The value is opaque: it is compared byte-for-byte and never normalized,
/// so it must be a stable account key rather than a mutable display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Creates a new actor ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_core::ActorId;
    ///
    /// let id = ActorId::new("acct-1042");
    /// assert_eq!(id.as_str(), "acct-1042");
    /// ```
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Returns the actor ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ActorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ActorId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(Error::invalid_id("actor id must not be empty"));
        }
        Ok(Self(s.to_string()))
    }
}

// ============================================================================
// ResourceKind
// ============================================================================

/// The kind of a protected resource.
///
/// Kind names are case-folded when parsed: `Sketch:1` and `sketch:1` name
/// the same resource. Actor ids, by contrast, are compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ResourceKind {
    /// An investigation sketch.
    Sketch,
    /// An imported timeline.
    Timeline,
    /// Any other protected entity. Built with [`ResourceKind::other`].
    Other(KindName),
}

/// Validated name of a [`ResourceKind::Other`] kind.
///
/// Always lowercase, non-blank, free of `:` and distinct from the built-in
/// kind names, so the text form of a key maps back to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindName(String);

impl KindName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ResourceKind {
    /// Creates a custom kind.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidId`] if `name` is blank, not lowercase, contains `:`
    /// or is the name of a built-in kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_core::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::other("savedgraph").unwrap().as_str(), "savedgraph");
    /// assert!(ResourceKind::other("sketch").is_err());
    /// assert!(ResourceKind::other("Graph").is_err());
    /// ```
    pub fn other(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_id("resource kind must not be empty"));
        }
        if name.contains(KEY_SEPARATOR) {
            return Err(Error::invalid_id(format!(
                "resource kind '{name}' must not contain '{KEY_SEPARATOR}'"
            )));
        }
        if name != name.trim() || name != name.to_lowercase() {
            return Err(Error::invalid_id(format!(
                "resource kind '{name}' must be trimmed lowercase"
            )));
        }
        if matches!(name.as_str(), "sketch" | "timeline") {
            return Err(Error::invalid_id(format!(
                "resource kind '{name}' is reserved"
            )));
        }
        Ok(Self::Other(KindName(name)))
    }

    /// Returns the lowercase name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sketch => "sketch",
            Self::Timeline => "timeline",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    /// Parses a kind name, trimming and lowercasing it first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Ok(match name.as_str() {
            "sketch" => Self::Sketch,
            "timeline" => Self::Timeline,
            _ => Self::other(name)?,
        })
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl TryFrom<String> for ResourceKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ============================================================================
// ResourceId / ResourceKey
// ============================================================================

/// Row id of a protected resource within its kind.
pub type ResourceId = u64;

/// Composite key identifying one protected resource.
///
/// The text form is `kind:id`, e.g. `sketch:42`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceKey {
    /// Entity kind.
    pub kind: ResourceKind,
    /// Row id within the kind.
    pub id: ResourceId,
}

impl ResourceKey {
    /// Creates a key from a kind and id.
    pub fn new(kind: ResourceKind, id: ResourceId) -> Self {
        Self { kind, id }
    }

    /// Key of the sketch with the given id.
    ///
    /// # Examples
    ///
    /// ```
    /// use casefile_core::ResourceKey;
    ///
    /// assert_eq!(ResourceKey::sketch(7).to_string(), "sketch:7");
    /// ```
    pub fn sketch(id: ResourceId) -> Self {
        Self::new(ResourceKind::Sketch, id)
    }

    /// Key of the timeline with the given id.
    pub fn timeline(id: ResourceId) -> Self {
        Self::new(ResourceKind::Timeline, id)
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.kind, self.id)
    }
}

impl FromStr for ResourceKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s.rsplit_once(KEY_SEPARATOR).ok_or_else(|| {
            Error::invalid_id(format!("resource key '{s}' is not of the form kind:id"))
        })?;
        let id = id
            .trim()
            .parse::<ResourceId>()
            .map_err(|e| Error::invalid_id(format!("resource key '{s}': {e}")))?;
        Ok(Self::new(kind.parse()?, id))
    }
}

//! ACL configuration.

use casefile_core::config::{ConfigManager, env_prefix};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How `make_public`/`make_private` respond to an unauthorized caller.
///
/// In both modes the ACL is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialMode {
    /// Return [`Error::PermissionDenied`](crate::Error::PermissionDenied).
    #[default]
    Reject,
    /// Return `Ok(())` without signalling the refusal.
    Silent,
}

impl fmt::Display for DenialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Silent => write!(f, "silent"),
        }
    }
}

impl FromStr for DenialMode {
    type Err = casefile_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "silent" => Ok(Self::Silent),
            other => Err(casefile_core::Error::config(format!(
                "unknown denial mode '{other}' (expected 'reject' or 'silent')"
            ))),
        }
    }
}

/// Settings for the access evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclConfig {
    /// Response to unauthorized publication changes.
    #[serde(default)]
    pub denials: DenialMode,

    /// Log every read/write decision at info level instead of debug.
    #[serde(default)]
    pub log_decisions: bool,
}

impl AclConfig {
    /// Configuration that keeps unauthorized publication changes silent.
    pub fn silent() -> Self {
        Self {
            denials: DenialMode::Silent,
            ..Self::default()
        }
    }
}

impl ConfigManager for AclConfig {
    fn project_name() -> &'static str {
        "casefile-acl"
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> casefile_core::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = env_prefix(Self::project_name());
        if let Some(mode) = lookup(&format!("{prefix}_DENIALS")) {
            self.denials = mode.parse()?;
        }
        if let Some(flag) = lookup(&format!("{prefix}_LOG_DECISIONS")) {
            self.log_decisions = matches!(flag.trim(), "1" | "true" | "yes");
        }
        Ok(())
    }
}

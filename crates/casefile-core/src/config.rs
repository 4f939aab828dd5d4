//! TOML-backed configuration loading.
//!
//! [`ConfigManager`] gives any serde-serializable settings type a standard
//! way to locate, load, and write its configuration file:
//!
//! 1. An explicit path passed by the caller
//! 2. The `<PROJECT>_CONFIG` environment variable
//! 3. `<platform config dir>/<project>/config.toml`
//!
//! A missing file at the implicit locations yields the type's defaults.
//! Environment overrides are applied last.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Looks up an environment variable by name.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Convert a project name to an environment variable prefix.
///
/// `"casefile-acl"` becomes `"CASEFILE_ACL"`.
pub fn env_prefix(project_name: &str) -> String {
    project_name.to_uppercase().replace(['-', ' '], "_")
}

/// Standard configuration lifecycle for a settings type.
pub trait ConfigManager: Serialize + DeserializeOwned + Default {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Apply `<PREFIX>_*` environment overrides.
    ///
    /// `lookup` resolves a variable name to its value.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let _ = lookup;
        Ok(())
    }

    /// Default location of the config file on this platform.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve the config file path using an explicit path, the environment,
    /// or the platform default, in that order.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(explicit, env_lookup)
    }

    /// [`resolve_config_path`](Self::resolve_config_path) with a custom
    /// environment lookup.
    fn resolve_config_path_with<F>(explicit: Option<&str>, lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        let var = format!("{}_CONFIG", env_prefix(Self::project_name()));
        if let Some(path) = lookup(&var).filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Parse a configuration from TOML text.
    fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Render the configuration as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Load the configuration from the process environment and filesystem.
    fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_with(explicit, env_lookup)
    }

    /// [`load`](Self::load) with a custom environment lookup.
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// an implicit location falls back to defaults.
    fn load_with<F>(explicit: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::resolve_config_path_with(explicit, &lookup) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                let config = Self::from_toml_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?;
                log::info!("Loaded {} config from {}", Self::project_name(), path.display());
                config
            }
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            Some(path) => {
                log::warn!(
                    "No {} config at {}, using defaults",
                    Self::project_name(),
                    path.display()
                );
                Self::default()
            }
            None => {
                log::warn!(
                    "Could not determine config directory for {}, using defaults",
                    Self::project_name()
                );
                Self::default()
            }
        };
        config.apply_env_overrides(&lookup)?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

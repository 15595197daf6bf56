//! Host-level settings lookup
//!
//! The original integration read a `build_env` block from the editor's
//! settings; the CLI reads the same shape from a small JSON file named
//! via `--settings` or `PROVE_RUNNER_SETTINGS`. Only the PATH override
//! is consumed; it seeds the environment overlay of every invocation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ProveError, Result};

/// Host settings, deserialized from the settings file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Build environment overrides
    #[serde(default)]
    pub build_env: BuildEnv,
}

/// The `build_env` settings block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildEnv {
    /// PATH override for the runner subprocess
    #[serde(rename = "PATH")]
    pub path: Option<String>,
}

impl Settings {
    /// Load settings from a file, or defaults when no file was named
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path).map_err(|e| ProveError::Settings {
            message: format!("{}: {}", path.display(), e),
        })?;

        serde_json::from_str(&raw).map_err(|e| ProveError::Settings {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Seed overlay entries from host configuration
    pub fn base_overlay(&self) -> BTreeMap<String, String> {
        let mut env = BTreeMap::new();
        if let Some(ref path) = self.build_env.path {
            env.insert("PATH".to_string(), path.clone());
        }
        env
    }
}

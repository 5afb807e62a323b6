//! Optional `snek.toml` configuration.
//!
//! Everything has a built-in default, so a repository without a config file
//! behaves exactly like one with an empty file:
//!
//! ```toml
//! [sync]
//! steps = [
//!     { stage = "Updating dot files", command = "git pull" },
//!     { command = "git push" },
//! ]
//!
//! [link]
//! destination = "/home/me"
//! ```
pub mod toml_loader;
pub mod validation;

use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::sync::{SyncStep, default_steps};

/// File name looked up in the repository root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "snek.toml";

/// All loaded configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The `[sync]` table.
    #[serde(default)]
    pub sync: SyncConfig,
    /// The `[link]` table.
    #[serde(default)]
    pub link: LinkConfig,
}

/// Synchronization settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Commands run by `snek update`, in order.
    #[serde(default = "default_steps")]
    pub steps: Vec<SyncStep>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
        }
    }
}

/// Link settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    /// Destination tree for `snek link`; the home directory when unset.
    pub destination: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        toml_loader::load_config(path).with_context(|| format!("loading {}", path.display()))
    }

    /// Check the configuration for likely mistakes.
    #[must_use]
    pub fn validate(&self) -> Vec<validation::ValidationWarning> {
        validation::validate_all(self)
    }
}

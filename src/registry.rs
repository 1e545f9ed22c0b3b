//! Registered-application list and global settings
//!
//! One TOML file under the XDG config dir holds the active wrapper
//! command, the applications directory, and the set of registered
//! application names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::config::{APPLICATIONS_DIR, APP_DIR, FILENAME};
use crate::constants::prefix::PRIMUSRUN;

#[derive(Debug, Serialize, Deserialize)]
pub struct Registry {
    /// Wrapper command applied by `add` and `sync`
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Directory holding the desktop entry files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Registered application names, kept sorted
    #[serde(default)]
    pub entries: BTreeSet<String>,
}

fn default_prefix() -> String {
    PRIMUSRUN.to_string()
}

fn default_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APPLICATIONS_DIR)
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            directory: default_directory(),
            entries: BTreeSet::new(),
        }
    }
}

impl Registry {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(APP_DIR);
        path.push(FILENAME);
        path
    }

    /// Load the registry from the config file, creating a default one when
    /// it does not exist yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("registry not found, creating default at {:?}", path);
            let registry = Registry::default();
            registry.save_to(path)?;
            return Ok(registry);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry from {path:?}"))?;

        let registry: Registry = toml::from_str(&contents)
            .with_context(|| format!("failed to parse registry from {path:?}"))?;

        Ok(registry)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory {parent:?}"))?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize registry")?;

        fs::write(path, contents)
            .with_context(|| format!("failed to write registry to {path:?}"))?;

        Ok(())
    }

    /// Register a name; returns false when it was already present
    pub fn add(&mut self, name: &str) -> bool {
        self.entries.insert(name.to_string())
    }

    /// Unregister a name; returns false when it was not present
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name)
    }
}

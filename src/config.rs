//! Configuration loading and management
//!
//! Handles parsing of the optional `config.toml` in the platform config
//! directory (e.g. `~/.config/td/config.toml` on Linux). A missing file
//! means defaults; a malformed file is an error, since unlike saved task
//! data the config is user-authored input.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::task::Priority;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Task defaults
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the task list path; platform data dir when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Task-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Priority assigned when a new task does not specify one
    #[serde(default = "default_priority")]
    pub default_priority: Priority,
}

fn default_priority() -> Priority {
    Priority::Medium
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_priority: default_priority(),
        }
    }
}

impl Config {
    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path; missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Path to the config file, if a config directory can be determined
pub fn config_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "td")?;
    Some(dirs.config_dir().join("config.toml"))
}

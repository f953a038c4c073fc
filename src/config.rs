//! Configuration for FDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Default environment variable naming the root directory
pub const DEFAULT_ROOT_ENV: &str = "FDB_ROOT";

/// Default root directory when the environment variable is unset or empty
pub const DEFAULT_ROOT_PATH: &str = "/var/fdb";

/// Configuration for resolving the store's root directory
///
/// Resolution order at [`Root::init`](crate::Root::init):
/// 1. The value of the environment variable named by `root_env`
/// 2. `fallback_root` if the variable is unset or empty
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Root Resolution
    // -------------------------------------------------------------------------
    /// Environment variable consulted for the root directory path
    pub root_env: String,

    /// Path used when the environment variable is unset or empty
    pub fallback_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_env: DEFAULT_ROOT_ENV.to_string(),
            fallback_root: PathBuf::from(DEFAULT_ROOT_PATH),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the environment variable consulted for the root path
    pub fn root_env(mut self, name: impl Into<String>) -> Self {
        self.config.root_env = name.into();
        self
    }

    /// Set the path used when the environment variable is unset or empty
    pub fn fallback_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.fallback_root = path.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

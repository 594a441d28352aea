//! Configuration module
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CTXPLAN_*)
//! 3. Project config (`ctxplan.toml` next to the solution)
//! 4. User config (`<config_dir>/ctxplan/config.toml`)
//! 5. Built-in defaults (lowest priority)

use std::path::PathBuf;

mod loader;
mod types;

pub use loader::{apply_env, user_config_path, PROJECT_CONFIG_FILE};
pub use types::{
    Config, InventoryConfig, LayersConfig, OutputConfig, PacksConfig, SelectionConfig,
    ToolchainConfig, Verbosity,
};

use crate::domain::value_objects::{UnknownLoadPolicy, VersionRangeError};

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unknown key
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed line, if found
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    LoadPolicy(#[from] UnknownLoadPolicy),

    #[error("invalid toolchain: {0}")]
    Toolchain(#[from] VersionRangeError),
}

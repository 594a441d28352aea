//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::domain::entities::ToolchainRequirement;
use crate::domain::value_objects::{ContextOrder, LoadPacksPolicy};

use super::loader;
use super::{ConfigError, ConfigWarning};

/// Pack resolution configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacksConfig {
    #[serde(default)]
    pub load: LoadPacksPolicy,

    /// Fail contexts whose packs differ from the build index lock.
    #[serde(default)]
    pub frozen: bool,
}

/// Layer discovery configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayersConfig {
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

/// Context selection configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// List contexts in the order they are declared instead of sorting them.
    #[serde(default)]
    pub yml_order: bool,

    /// Use (and update) the saved context set.
    #[serde(default)]
    pub context_set: bool,
}

impl SelectionConfig {
    /// Order of `list contexts`; runs always follow declaration order.
    pub fn order(&self) -> ContextOrder {
        if self.yml_order {
            ContextOrder::Yml
        } else {
            ContextOrder::Sorted
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root of `out/` and `tmp/`, relative to the solution directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Default `tracing` level when `RUST_LOG` is unset.
    pub fn log_level(&self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
        }
    }
}

/// Toolchain configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Forced toolchain, e.g. `GCC@12.2.0`.
    #[serde(default)]
    pub selected: Option<ToolchainRequirement>,
}

/// Inventory configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// YAML document describing installed packs, toolchains, boards and devices.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub packs: PacksConfig,

    #[serde(default)]
    pub layers: LayersConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub toolchain: ToolchainConfig,

    #[serde(default)]
    pub inventory: InventoryConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Project config next to the solution, else user config, else defaults;
    /// environment overrides applied last.
    pub fn load_for_solution(
        solution_dir: &Path,
    ) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_for_solution(solution_dir)
    }

    /// Apply environment variable overrides (CTXPLAN_* prefix)
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        loader::apply_env(self, |key| std::env::var(key).ok())
    }
}

//! Resolve Options

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::entities::ToolchainRequirement;
use crate::domain::services::{BuildOptions, RunOptions};
use crate::domain::value_objects::LoadPacksPolicy;

/// Options for the resolve use case
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// `-c` patterns; empty selects everything (or the context set).
    pub patterns: Vec<String>,
    /// Read the saved context set and write the selection back.
    pub use_context_set: bool,
    pub policy: LoadPacksPolicy,
    pub frozen: bool,
    pub toolchain: Option<ToolchainRequirement>,
    pub layer_search_paths: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Write the build index after the run.
    pub persist: bool,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self {
            persist: true,
            ..Self::default()
        }
    }

    /// Start from the effective configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            use_context_set: config.selection.context_set,
            policy: config.packs.load,
            frozen: config.packs.frozen,
            toolchain: config.toolchain.selected.clone(),
            layer_search_paths: config.layers.search_paths.clone(),
            output_dir: config.output.dir.clone(),
            ..Self::new()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn with_policy(mut self, policy: LoadPacksPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    pub fn with_context_set(mut self, use_context_set: bool) -> Self {
        self.use_context_set = use_context_set;
        self
    }

    pub fn with_toolchain(mut self, toolchain: ToolchainRequirement) -> Self {
        self.toolchain = Some(toolchain);
        self
    }

    pub fn with_layer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.layer_search_paths.push(path.into());
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.persist = false;
        self
    }

    pub(super) fn run_options(&self) -> RunOptions {
        RunOptions {
            build: BuildOptions {
                policy: self.policy,
                frozen: self.frozen,
                forced_toolchain: self.toolchain.clone(),
            },
            layer_search_paths: self.layer_search_paths.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

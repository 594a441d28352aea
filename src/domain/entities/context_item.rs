//! ContextItem entity
//!
//! The resolved build plan of one context. Items are created `Pending` by the
//! resolution run and settle to `Succeeded` or `Failed` exactly once. A failed
//! item keeps whatever was resolved before the failing step.

use std::path::PathBuf;

use semver::Version;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::warn;

use super::{
    BoardRecord, ContextDirectories, DeviceRecord, Layer, PackId, ResolvedPack, ResolvedToolchain,
};
use crate::domain::value_objects::{ContextId, VersionRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextStatus {
    Pending,
    Succeeded,
    Failed,
}

/// Problems found while resolving one context.
///
/// Whether a kind fails the context depends on where the builder records it:
/// `errors` fail the context, `warnings` are diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no installed version of pack '{pack}' satisfies '{range}'")]
    PackUnsatisfied { pack: PackId, range: VersionRange },

    #[error("pack '{pack}' drifted from the frozen snapshot: locked {}, resolved {}",
        display_version(.locked), display_version(.resolved))]
    PackVersionDrift {
        pack: PackId,
        locked: Option<Version>,
        resolved: Option<Version>,
    },

    #[error("toolchain '{requirement}' could not be resolved: {reason}")]
    ToolchainUnresolved { requirement: String, reason: String },

    #[error("{kind} '{name}' was not found")]
    DeviceNotFound { kind: &'static str, name: String },

    #[error("{kind} '{name}' is ambiguous: {count} records match")]
    DeviceAmbiguous {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("neither a board nor a device is specified")]
    DeviceUnspecified,

    #[error("layer '{0}' is not declared and was not found on the search path")]
    UnknownLayer(String),

    #[error("layer '{layer}': {reason}")]
    LayerWiringConflict { layer: String, reason: String },

    #[error("unresolved component dependency: {0}")]
    UnresolvedComponentDependency(String),
}

fn display_version(version: &Option<Version>) -> String {
    match version {
        Some(v) => v.to_string(),
        None => "nothing".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextItem {
    pub identifier: ContextId,
    pub directories: ContextDirectories,
    pub board: Option<BoardRecord>,
    pub device: Option<DeviceRecord>,
    pub resolved_toolchain: Option<ResolvedToolchain>,
    pub resolved_layers: Vec<Layer>,
    pub resolved_packs: Vec<ResolvedPack>,
    pub unresolved_dependencies: Vec<String>,
    pub config_files: Vec<PathBuf>,
    #[serde(serialize_with = "serialize_messages")]
    pub warnings: Vec<ResolveError>,
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<ResolveError>,
    status: ContextStatus,
}

fn serialize_messages<S: serde::Serializer>(
    items: &[ResolveError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(items.iter().map(ToString::to_string))
}

/// The plan-relevant part of an item; diagnostics and status are excluded.
#[derive(Serialize)]
struct PlanView<'a> {
    identifier: &'a ContextId,
    directories: &'a ContextDirectories,
    board: Option<String>,
    device: Option<String>,
    toolchain: Option<&'a ResolvedToolchain>,
    layers: Vec<&'a str>,
    packs: &'a [ResolvedPack],
    unresolved_dependencies: &'a [String],
    config_files: &'a [PathBuf],
}

impl ContextItem {
    pub fn new(identifier: ContextId, directories: ContextDirectories) -> Self {
        Self {
            identifier,
            directories,
            board: None,
            device: None,
            resolved_toolchain: None,
            resolved_layers: Vec::new(),
            resolved_packs: Vec::new(),
            unresolved_dependencies: Vec::new(),
            config_files: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            status: ContextStatus::Pending,
        }
    }

    pub fn status(&self) -> ContextStatus {
        self.status
    }

    pub fn succeeded(&self) -> bool {
        self.status == ContextStatus::Succeeded
    }

    pub fn failed(&self) -> bool {
        self.status == ContextStatus::Failed
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error(&mut self, error: ResolveError) {
        self.errors.push(error);
    }

    pub fn warn(&mut self, warning: ResolveError) {
        self.warnings.push(warning);
    }

    /// Settle a pending item from its recorded errors. Settled items keep
    /// their status.
    pub fn finish(&mut self) -> ContextStatus {
        if self.status == ContextStatus::Pending {
            self.status = if self.errors.is_empty() {
                ContextStatus::Succeeded
            } else {
                ContextStatus::Failed
            };
        }
        self.status
    }

    pub fn layer_ids(&self) -> impl Iterator<Item = &str> {
        self.resolved_layers.iter().map(|l| l.id.as_str())
    }

    /// SHA-256 over the canonical JSON form of the plan, or `None` when the
    /// plan does not serialize (e.g. a path that is not valid UTF-8).
    pub fn fingerprint(&self) -> Option<String> {
        let view = PlanView {
            identifier: &self.identifier,
            directories: &self.directories,
            board: self.board.as_ref().map(ToString::to_string),
            device: self.device.as_ref().map(ToString::to_string),
            toolchain: self.resolved_toolchain.as_ref(),
            layers: self.layer_ids().collect(),
            packs: &self.resolved_packs,
            unresolved_dependencies: &self.unresolved_dependencies,
            config_files: &self.config_files,
        };
        match serde_json::to_vec(&view) {
            Ok(bytes) => Some(format!("sha256:{:x}", Sha256::digest(&bytes))),
            Err(e) => {
                warn!(context = %self.identifier, error = %e, "plan cannot be fingerprinted");
                None
            }
        }
    }
}

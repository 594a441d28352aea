//! Listings
//!
//! Read-only views over a solution, an inventory or a finished run, as
//! printed by `ctxplan list ...`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::{PackId, Solution};
use crate::domain::ports::{DeviceInventory, PackInventory, ToolchainInventory};
use crate::domain::services::{select, RunReport, SelectionError, SelectionRequest};
use crate::domain::value_objects::ContextId;

/// Selected contexts, in selection order, optionally narrowed to those whose
/// identifier contains `filter`.
pub fn list_contexts(
    solution: &Solution,
    request: &SelectionRequest,
    filter: Option<&str>,
) -> Result<Vec<ContextId>, SelectionError> {
    let selection = select(&solution.expand(None), request)?;
    Ok(selection
        .ids()
        .into_iter()
        .filter(|id| matches_filter(&id.to_string(), filter))
        .collect())
}

/// Packs of every processed context, sorted and deduplicated.
pub fn list_packs(report: &RunReport, missing_only: bool) -> Vec<String> {
    report
        .items
        .iter()
        .flat_map(|i| i.resolved_packs.iter())
        .filter(|p| !missing_only || p.is_missing())
        .map(ToString::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Components shipped by the installed packs of every processed context,
/// as `component (pack@version)`, sorted and deduplicated.
pub fn list_components(
    report: &RunReport,
    inventory: &dyn PackInventory,
    filter: Option<&str>,
) -> Vec<String> {
    report
        .items
        .iter()
        .flat_map(|i| i.resolved_packs.iter())
        .filter_map(|p| p.version.as_ref().map(|v| (p, v)))
        .flat_map(|(pack, version)| {
            inventory
                .components(&pack.pack, version)
                .into_iter()
                .map(move |c| format!("{} ({})", c.id, pack))
        })
        .filter(|entry| matches_filter(entry, filter))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Boards of the device inventory, sorted and deduplicated.
pub fn list_boards(inventory: &dyn DeviceInventory, filter: Option<&str>) -> Vec<String> {
    inventory
        .all_boards()
        .iter()
        .map(|b| with_pack(b.to_string(), b.pack.as_ref()))
        .filter(|entry| matches_filter(entry, filter))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Devices of the device inventory, sorted and deduplicated.
pub fn list_devices(inventory: &dyn DeviceInventory, filter: Option<&str>) -> Vec<String> {
    inventory
        .all_devices()
        .iter()
        .map(|d| with_pack(d.to_string(), d.pack.as_ref()))
        .filter(|entry| matches_filter(entry, filter))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn with_pack(entry: String, pack: Option<&PackId>) -> String {
    match pack {
        Some(pack) => format!("{} ({})", entry, pack),
        None => entry,
    }
}

fn matches_filter(entry: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| entry.contains(f))
}

/// Unresolved component dependencies of every processed context.
pub fn list_dependencies(report: &RunReport) -> Vec<String> {
    report
        .items
        .iter()
        .flat_map(|i| i.unresolved_dependencies.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Component configuration files, in first-seen order.
pub fn list_configs(report: &RunReport) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for file in report.items.iter().flat_map(|i| i.config_files.iter()) {
        if !files.contains(file) {
            files.push(file.clone());
        }
    }
    files
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolchainListing {
    pub toolchain: String,
    pub root: PathBuf,
    /// Environment variable build tools read the root from.
    pub variable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,
}

pub fn list_toolchains(inventory: &dyn ToolchainInventory) -> Vec<ToolchainListing> {
    inventory
        .list()
        .into_iter()
        .map(|t| ToolchainListing {
            toolchain: t.to_string(),
            variable: t.environment_variable(),
            root: t.root,
            config: t.config,
        })
        .collect()
}

//! Context builder
//!
//! Resolves one context into a `ContextItem`. Steps run in order: device
//! and toolchain (both always attempted), layers, packs, then components.
//! A hard error stops the remaining steps and fails the item; whatever was
//! resolved before stays on the item.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::entities::{
    component_matches, BuildIndex, ComponentRecord, ContextDescriptor, ContextItem, Layer,
    PackRequirement, ResolveError, ResolvedToolchain, Solution, ToolchainRequirement,
};
use crate::domain::ports::{DeviceInventory, PackInventory, ToolchainInventory};
use crate::domain::value_objects::LoadPacksPolicy;

use super::layer_resolver::{ConflictKind, LayerCompatibilityResolver};
use super::pack_resolver::PackResolver;

/// Run-wide knobs shared by every context.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub policy: LoadPacksPolicy,
    pub frozen: bool,
    pub forced_toolchain: Option<ToolchainRequirement>,
}

#[derive(Clone, Copy)]
pub struct ContextBuilder<'a> {
    solution: &'a Solution,
    packs: &'a dyn PackInventory,
    toolchains: &'a dyn ToolchainInventory,
    devices: &'a dyn DeviceInventory,
    layers: LayerCompatibilityResolver<'a>,
    snapshot: Option<&'a BuildIndex>,
    options: &'a BuildOptions,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(
        solution: &'a Solution,
        packs: &'a dyn PackInventory,
        toolchains: &'a dyn ToolchainInventory,
        devices: &'a dyn DeviceInventory,
        discovered: &'a [Layer],
        options: &'a BuildOptions,
    ) -> Self {
        Self {
            solution,
            packs,
            toolchains,
            devices,
            layers: LayerCompatibilityResolver::new(solution.layers(), discovered),
            snapshot: None,
            options,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Option<&'a BuildIndex>) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn build(&self, descriptor: &ContextDescriptor) -> ContextItem {
        let mut item = ContextItem::new(descriptor.id.clone(), descriptor.directories.clone());

        self.resolve_device(descriptor, &mut item);
        self.resolve_toolchain(descriptor, &mut item);
        if item.has_errors() {
            item.finish();
            return item;
        }

        let referenced: Vec<&str> = descriptor
            .project
            .layers
            .iter()
            .filter(|r| r.filter.applies_to(&descriptor.id))
            .map(|r| r.layer.as_str())
            .collect();
        let report = self.layers.resolve(&descriptor.id, &referenced);
        item.resolved_layers = report.compatible;
        for conflict in report.conflicts {
            let error = match conflict.kind {
                ConflictKind::Unknown => ResolveError::UnknownLayer(conflict.layer),
                ConflictKind::Substituted { .. } => {
                    item.warn(ResolveError::LayerWiringConflict {
                        reason: conflict.kind.to_string(),
                        layer: conflict.layer,
                    });
                    continue;
                }
                kind => ResolveError::LayerWiringConflict {
                    layer: conflict.layer,
                    reason: kind.to_string(),
                },
            };
            item.error(error);
        }
        if item.has_errors() {
            item.finish();
            return item;
        }

        let requirements = self.pack_requirements(descriptor, &item);
        let packs = PackResolver::new(self.packs, self.options.policy)
            .with_snapshot(self.snapshot)
            .frozen(self.options.frozen)
            .resolve(&requirements);
        item.resolved_packs = packs.packs;
        item.warnings.extend(packs.warnings);
        item.errors.extend(packs.errors);
        if item.has_errors() {
            item.finish();
            return item;
        }

        self.resolve_components(descriptor, &mut item);
        item.finish();
        item
    }

    fn resolve_device(&self, descriptor: &ContextDescriptor, item: &mut ContextItem) {
        let mut device_name = descriptor.device.clone();

        if let Some(board) = &descriptor.board {
            let mut boards = self.devices.boards(board);
            match boards.len() {
                0 => item.error(ResolveError::DeviceNotFound {
                    kind: "board",
                    name: board.clone(),
                }),
                1 => {
                    let board = boards.remove(0);
                    if device_name.is_none() {
                        device_name = board.mounted_device.clone();
                    }
                    item.board = Some(board);
                }
                count => item.error(ResolveError::DeviceAmbiguous {
                    kind: "board",
                    name: board.clone(),
                    count,
                }),
            }
        }

        let Some(name) = device_name else {
            if item.board.is_some() || descriptor.board.is_none() {
                item.error(ResolveError::DeviceUnspecified);
            }
            return;
        };
        let mut devices = self.devices.devices(&name);
        match devices.len() {
            0 => item.error(ResolveError::DeviceNotFound {
                kind: "device",
                name,
            }),
            1 => item.device = Some(devices.remove(0)),
            count => item.error(ResolveError::DeviceAmbiguous {
                kind: "device",
                name,
                count,
            }),
        }
    }

    fn resolve_toolchain(&self, descriptor: &ContextDescriptor, item: &mut ContextItem) {
        match select_toolchain(
            self.toolchains,
            descriptor.compiler.as_ref(),
            self.options.forced_toolchain.as_ref(),
        ) {
            Ok(toolchain) => {
                debug!(context = %descriptor.id, %toolchain, "toolchain selected");
                item.resolved_toolchain = Some(toolchain);
            }
            Err(error) => item.error(error),
        }
    }

    /// Solution packs, then project packs, then packs of compatible layers.
    fn pack_requirements(
        &self,
        descriptor: &ContextDescriptor,
        item: &ContextItem,
    ) -> Vec<PackRequirement> {
        self.solution
            .packs()
            .iter()
            .chain(descriptor.project.packs.iter())
            .chain(item.resolved_layers.iter().flat_map(|l| l.packs.iter()))
            .filter(|p| p.filter.applies_to(&descriptor.id))
            .cloned()
            .collect()
    }

    fn resolve_components(&self, descriptor: &ContextDescriptor, item: &mut ContextItem) {
        let catalog: Vec<ComponentRecord> = item
            .resolved_packs
            .iter()
            .filter_map(|p| p.version.as_ref().map(|v| (&p.pack, v)))
            .flat_map(|(pack, version)| self.packs.components(pack, version))
            .collect();

        let requested: Vec<String> = descriptor
            .project
            .components
            .iter()
            .chain(item.resolved_layers.iter().flat_map(|l| l.components.iter()))
            .filter(|c| c.filter.applies_to(&descriptor.id))
            .map(|c| c.component.clone())
            .collect();

        let mut selected: Vec<&ComponentRecord> = Vec::new();
        let mut unresolved: Vec<String> = Vec::new();
        for request in &requested {
            match catalog.iter().find(|c| component_matches(request, &c.id)) {
                Some(component) => {
                    if !selected.iter().any(|s| s.id == component.id) {
                        selected.push(component);
                    }
                }
                None => unresolved.push(request.clone()),
            }
        }

        for component in &selected {
            for dependency in &component.depends {
                if !selected.iter().any(|s| component_matches(dependency, &s.id)) {
                    unresolved.push(format!("{} requires {}", component.id, dependency));
                }
            }
        }

        let mut seen = HashSet::new();
        for component in &selected {
            for file in &component.config_files {
                let path = descriptor.directories.rte.join(file);
                if seen.insert(path.clone()) {
                    item.config_files.push(path);
                }
            }
        }

        for entry in &unresolved {
            item.warn(ResolveError::UnresolvedComponentDependency(entry.clone()));
        }
        item.unresolved_dependencies = unresolved;
    }
}

/// Pick a toolchain for a requirement, honouring a run-wide forced choice.
///
/// The highest satisfying version wins; equal versions keep inventory order.
pub fn select_toolchain(
    inventory: &dyn ToolchainInventory,
    required: Option<&ToolchainRequirement>,
    forced: Option<&ToolchainRequirement>,
) -> Result<ResolvedToolchain, ResolveError> {
    let unresolved = |requirement: String, reason: String| ResolveError::ToolchainUnresolved {
        requirement,
        reason,
    };

    let (wanted, also) = match (forced, required) {
        (None, None) => {
            return Err(unresolved(
                "<none>".to_string(),
                "no compiler is specified".to_string(),
            ))
        }
        (Some(forced), Some(required)) if forced.name != required.name => {
            return Err(unresolved(
                forced.to_string(),
                format!("the context requires compiler '{}'", required),
            ))
        }
        (Some(forced), required) => (forced, required),
        (None, Some(required)) => (required, None),
    };

    let mut best: Option<ResolvedToolchain> = None;
    for candidate in inventory.lookup(&wanted.name, &wanted.range) {
        if also.is_some_and(|r| !r.range.contains(&candidate.version)) {
            continue;
        }
        if best.as_ref().map_or(true, |b| candidate.version > b.version) {
            best = Some(candidate);
        }
    }

    best.ok_or_else(|| {
        let reason = match also {
            Some(required) if !required.range.is_any() => format!(
                "no installed version satisfies both '{}' and '{}'",
                wanted, required
            ),
            _ => "no installed version satisfies the range".to_string(),
        };
        unresolved(wanted.to_string(), reason)
    })
}

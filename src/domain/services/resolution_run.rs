//! Resolution run
//!
//! Drives the context builder over the selected contexts. A failing context
//! is recorded and the run moves on; only cancellation stops the loop early.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info, info_span, warn};

use crate::domain::entities::{BuildIndex, ContextItem, Layer, Solution};
use crate::domain::ports::{
    DeviceInventory, LayerDiscovery, LayerDiscoveryError, PackInventory, ToolchainInventory,
};
use crate::domain::value_objects::{ContextId, ContextOrder};

use super::context_builder::{BuildOptions, ContextBuilder};
use super::selection::{select, SelectionError, SelectionRequest};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("frozen packs requested but no build index exists")]
    FrozenSnapshotMissing,

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    LayerDiscovery(#[from] LayerDiscoveryError),
}

/// The collaborators a run reads from.
#[derive(Clone, Copy)]
pub struct Inventories<'a> {
    pub packs: &'a dyn PackInventory,
    pub toolchains: &'a dyn ToolchainInventory,
    pub devices: &'a dyn DeviceInventory,
    pub layers: &'a dyn LayerDiscovery,
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub build: BuildOptions,
    pub layer_search_paths: Vec<PathBuf>,
    /// Replaces the solution directory as the root of `out/` and `tmp/`.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    /// Every context succeeded, but filters missed or diagnostics were raised.
    SucceededWithWarnings,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// One item per processed context, in selection order.
    pub items: Vec<ContextItem>,
    /// Identifiers of failed contexts, in selection order.
    pub failed: Vec<ContextId>,
    pub missing_filters: Vec<String>,
    pub warnings: Vec<String>,
    /// Layers found on the search path.
    pub discovered_layers: Vec<Layer>,
    /// Set when the run was cancelled before every context was processed.
    pub cancelled: bool,
}

impl RunReport {
    pub fn outcome(&self) -> RunOutcome {
        if self.cancelled || !self.failed.is_empty() {
            RunOutcome::Failed
        } else if !self.missing_filters.is_empty()
            || !self.warnings.is_empty()
            || self.items.iter().any(|i| !i.warnings.is_empty())
        {
            RunOutcome::SucceededWithWarnings
        } else {
            RunOutcome::Succeeded
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome() != RunOutcome::Failed
    }

    pub fn item(&self, id: &ContextId) -> Option<&ContextItem> {
        self.items.iter().find(|i| &i.identifier == id)
    }
}

pub struct ResolutionRun<'a> {
    solution: &'a Solution,
    inventories: Inventories<'a>,
    snapshot: Option<&'a BuildIndex>,
    options: RunOptions,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> ResolutionRun<'a> {
    pub fn new(solution: &'a Solution, inventories: Inventories<'a>, options: RunOptions) -> Self {
        Self {
            solution,
            inventories,
            snapshot: None,
            options,
            cancel: None,
        }
    }

    /// The build index of the previous run, if any.
    pub fn with_snapshot(mut self, snapshot: Option<&'a BuildIndex>) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn with_cancellation(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|c| c.load(Ordering::SeqCst))
    }

    pub fn execute(&self, request: &SelectionRequest) -> Result<RunReport, RunError> {
        if self.options.build.frozen && self.snapshot.is_none() {
            return Err(RunError::FrozenSnapshotMissing);
        }

        let universe = self.solution.expand(self.options.output_dir.as_deref());
        let request = request.clone().with_order(ContextOrder::Yml);
        let selection = select(&universe, &request)?;
        let discovered = self
            .inventories
            .layers
            .list_layers(&self.options.layer_search_paths)?;

        let builder = ContextBuilder::new(
            self.solution,
            self.inventories.packs,
            self.inventories.toolchains,
            self.inventories.devices,
            &discovered,
            &self.options.build,
        )
        .with_snapshot(self.snapshot);

        let mut report = RunReport {
            missing_filters: selection.missing_filters.clone(),
            warnings: selection.warnings.clone(),
            ..RunReport::default()
        };

        for descriptor in &selection.selected {
            if self.is_cancelled() {
                warn!(
                    remaining = selection.selected.len() - report.items.len(),
                    "run cancelled"
                );
                report.cancelled = true;
                break;
            }

            let span = info_span!("context", id = %descriptor.id);
            let _guard = span.enter();
            let item = builder.build(descriptor);
            if item.failed() {
                for problem in &item.errors {
                    error!(%problem, "resolution error");
                }
                error!("processing context '{}' failed", descriptor.id);
                report.failed.push(descriptor.id.clone());
            } else {
                info!(warnings = item.warnings.len(), "context resolved");
            }
            report.items.push(item);
        }

        info!(
            processed = report.items.len(),
            failed = report.failed.len(),
            missing_filters = report.missing_filters.len(),
            "run finished"
        );
        report.discovered_layers = discovered;
        Ok(report)
    }
}

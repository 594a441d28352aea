//! Resolve Use Case
//!
//! 1. Load the build index and, when requested, the saved context set
//! 2. Select and resolve contexts
//! 3. Update the build index (pack lock, layers, fingerprints)
//! 4. Write the selection back as the context set

use std::sync::atomic::AtomicBool;

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, info};

use crate::domain::entities::{BuildIndex, ContextSet, Solution};
use crate::domain::ports::{BuildIndexRepository, ContextSetRepository};
use crate::domain::services::{
    ContextSetRequest, Inventories, ResolutionRun, RunReport, SelectionRequest,
};

use super::options::ResolveOptions;
use super::result::ResolveResult;

pub struct ResolveUseCase<IR, CR>
where
    IR: BuildIndexRepository,
    CR: ContextSetRepository,
{
    index_repo: IR,
    context_set_repo: CR,
}

impl<IR, CR> ResolveUseCase<IR, CR>
where
    IR: BuildIndexRepository,
    CR: ContextSetRepository,
{
    pub fn new(index_repo: IR, context_set_repo: CR) -> Self {
        Self {
            index_repo,
            context_set_repo,
        }
    }

    pub fn execute(
        &self,
        solution: &Solution,
        inventories: Inventories<'_>,
        options: &ResolveOptions,
    ) -> anyhow::Result<ResolveResult> {
        self.execute_with_cancellation(solution, inventories, options, None)
    }

    /// Execute, checking `cancel` between contexts. A cancelled run persists
    /// nothing.
    pub fn execute_with_cancellation(
        &self,
        solution: &Solution,
        inventories: Inventories<'_>,
        options: &ResolveOptions,
        cancel: Option<&AtomicBool>,
    ) -> anyhow::Result<ResolveResult> {
        let snapshot = self
            .index_repo
            .load()
            .context("failed to load the build index")?;
        let saved_set = if options.use_context_set {
            Some(
                self.context_set_repo
                    .load()
                    .context("failed to load the context set")?,
            )
        } else {
            None
        };

        let request = SelectionRequest {
            patterns: options.patterns.clone(),
            context_set: match &saved_set {
                Some(set) => ContextSetRequest::Requested(set.clone()),
                None => ContextSetRequest::NotRequested,
            },
            ..SelectionRequest::default()
        };

        let mut run = ResolutionRun::new(solution, inventories, options.run_options())
            .with_snapshot(snapshot.as_ref());
        if let Some(cancel) = cancel {
            run = run.with_cancellation(cancel);
        }
        let report = run
            .execute(&request)
            .with_context(|| format!("failed to resolve solution '{}'", solution.name()))?;

        let mut result = ResolveResult {
            report,
            ..ResolveResult::default()
        };
        if result.report.cancelled || !options.persist {
            return Ok(result);
        }

        let index = updated_index(snapshot, &result.report, options.frozen);
        self.index_repo
            .save(&index)
            .context("failed to save the build index")?;
        result.index_saved = true;

        // An explicit selection replaces the saved set; a missing set is seeded.
        if let Some(saved) = saved_set {
            if !options.patterns.is_empty() || saved.is_none() {
                let set = self.selected_set(&result.report, options);
                self.context_set_repo
                    .save(&set)
                    .context("failed to save the context set")?;
                info!(contexts = set.contexts.len(), "context set saved");
                result.context_set_saved = true;
            }
        }

        Ok(result)
    }

    fn selected_set(&self, report: &RunReport, options: &ResolveOptions) -> ContextSet {
        let set = ContextSet::new(report.items.iter().map(|i| i.identifier.clone()).collect());
        let compiler = options.toolchain.as_ref().map(ToString::to_string).or_else(|| {
            report
                .items
                .iter()
                .find_map(|i| i.resolved_toolchain.as_ref())
                .map(ToString::to_string)
        });
        match compiler {
            Some(compiler) => set.with_compiler(compiler),
            None => set,
        }
    }
}

/// Fold a run into the previous index. Frozen runs leave the pack lock as is.
fn updated_index(snapshot: Option<BuildIndex>, report: &RunReport, frozen: bool) -> BuildIndex {
    let mut index = snapshot.unwrap_or_default();

    if !frozen {
        index.lock_packs(
            report
                .items
                .iter()
                .filter(|i| i.succeeded())
                .flat_map(|i| i.resolved_packs.iter()),
        );
    }

    for item in &report.items {
        let key = item.identifier.to_string();
        index.record_layers(&key, item.layer_ids().map(String::from).collect());
        if item.succeeded() {
            index.record_fingerprint(&key, item.fingerprint());
        }
    }

    index.touch(Utc::now());
    debug!(packs = index.packs.len(), contexts = index.contexts.len(), "build index updated");
    index
}

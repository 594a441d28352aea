use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::Solution;
use crate::domain::ports::{BuildIndexRepository, LayerDiscovery};
use crate::domain::services::{select, LayerCompatibilityResolver, SelectionRequest};
use crate::domain::value_objects::ContextId;

#[derive(Debug, Clone, Serialize)]
pub struct LayerSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// `None` for layers declared inside the solution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextLayers {
    pub context: ContextId,
    pub referenced: Vec<String>,
    pub compatible: Vec<String>,
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerQueryResult {
    pub available: Vec<LayerSummary>,
    pub contexts: Vec<ContextLayers>,
    pub missing_filters: Vec<String>,
    pub index_saved: bool,
}

impl LayerQueryResult {
    /// Whether any selected context has a fatal layer conflict.
    pub fn has_conflicts(&self) -> bool {
        self.contexts.iter().any(|c| !c.conflicts.is_empty())
    }
}

/// Layer compatibility per selected context, without resolving packs.
pub struct LayerQueryUseCase<IR: BuildIndexRepository> {
    index_repo: IR,
}

impl<IR: BuildIndexRepository> LayerQueryUseCase<IR> {
    pub fn new(index_repo: IR) -> Self {
        Self { index_repo }
    }

    /// With `update_index`, the compatible layers of every selected context
    /// are recorded in the build index.
    pub fn query(
        &self,
        solution: &Solution,
        discovery: &dyn LayerDiscovery,
        search_paths: &[PathBuf],
        request: &SelectionRequest,
        update_index: bool,
    ) -> anyhow::Result<LayerQueryResult> {
        let discovered = discovery
            .list_layers(search_paths)
            .context("failed to discover layers")?;
        let resolver = LayerCompatibilityResolver::new(solution.layers(), &discovered);
        let selection = select(&solution.expand(None), request)?;

        let contexts: Vec<ContextLayers> = selection
            .selected
            .iter()
            .map(|descriptor| {
                let referenced: Vec<&str> = descriptor
                    .project
                    .layers
                    .iter()
                    .filter(|r| r.filter.applies_to(&descriptor.id))
                    .map(|r| r.layer.as_str())
                    .collect();
                let report = resolver.resolve(&descriptor.id, &referenced);
                ContextLayers {
                    context: descriptor.id.clone(),
                    compatible: report.compatible_ids(),
                    conflicts: report
                        .conflicts
                        .iter()
                        .filter(|c| c.is_fatal())
                        .map(ToString::to_string)
                        .collect(),
                    referenced: report.referenced,
                }
            })
            .collect();

        let mut index_saved = false;
        if update_index {
            let mut index = self
                .index_repo
                .load()
                .context("failed to load the build index")?
                .unwrap_or_default();
            for context in &contexts {
                index.record_layers(&context.context.to_string(), context.compatible.clone());
            }
            index.touch(Utc::now());
            self.index_repo
                .save(&index)
                .context("failed to save the build index")?;
            index_saved = true;
        }

        Ok(LayerQueryResult {
            available: resolver
                .pool()
                .into_iter()
                .map(|l| LayerSummary {
                    id: l.id.clone(),
                    category: l.category.clone(),
                    path: l.path.clone(),
                })
                .collect(),
            contexts,
            missing_filters: selection.missing_filters,
            index_saved,
        })
    }
}

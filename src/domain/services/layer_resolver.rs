//! Layer compatibility resolver
//!
//! Decides which layers a context can use. A layer is compatible when its
//! target-type patterns admit the context and every slot it consumes has
//! exactly one provider among the selected layers.
//!
//! Wiring is computed over a slot → providers index. Referenced layers are
//! selected first; a consumed slot with no selected provider pulls in the
//! single target-matching provider from the pool, repeated until nothing
//! changes. A final pass over the selected set reports unsatisfied and
//! ambiguous slots, then drops broken layers from the provider index until
//! every remaining layer is wired.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::entities::Layer;
use crate::domain::value_objects::ContextId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictKind {
    #[error("not declared and not found on the search path")]
    Unknown,

    #[error("does not support target-type '{target}' and {alternatives} compatible layers share its category")]
    IncompatibleTarget { target: String, alternatives: usize },

    #[error("consumes '{slot}' but no compatible layer provides it")]
    UnsatisfiedSlot { slot: String },

    #[error("consumes '{slot}', which is provided by more than one layer: {}", .providers.join(", "))]
    AmbiguousSlot { slot: String, providers: Vec<String> },

    #[error("replaced by compatible layer '{by}' of category '{category}'")]
    Substituted { by: String, category: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("layer '{layer}' {kind}")]
pub struct LayerConflict {
    pub layer: String,
    pub kind: ConflictKind,
}

impl LayerConflict {
    fn new(layer: &str, kind: ConflictKind) -> Self {
        Self {
            layer: layer.to_string(),
            kind,
        }
    }

    /// Everything except a category substitution makes the context unusable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, ConflictKind::Substituted { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerReport {
    /// Every layer in the pool, regardless of compatibility.
    pub available: Vec<String>,
    /// Layers named by the project, regardless of compatibility.
    pub referenced: Vec<String>,
    /// Layers that passed target matching and wiring, in selection order.
    pub compatible: Vec<Layer>,
    pub conflicts: Vec<LayerConflict>,
}

impl LayerReport {
    pub fn is_buildable(&self) -> bool {
        !self.conflicts.iter().any(LayerConflict::is_fatal)
    }

    pub fn compatible_ids(&self) -> Vec<String> {
        self.compatible.iter().map(|l| l.id.clone()).collect()
    }
}

type SlotIndex<'l> = BTreeMap<&'l str, Vec<&'l Layer>>;

fn slot_index<'l>(layers: &[&'l Layer]) -> SlotIndex<'l> {
    let mut index: SlotIndex<'l> = BTreeMap::new();
    for &layer in layers {
        for slot in layer.provides() {
            index.entry(slot).or_default().push(layer);
        }
    }
    index
}

/// Providers of `slot` other than the consumer itself.
fn providers<'l>(index: &SlotIndex<'l>, slot: &str, consumer: &str) -> Vec<&'l Layer> {
    index
        .get(slot)
        .map(|layers| layers.iter().copied().filter(|l| l.id != consumer).collect())
        .unwrap_or_default()
}

fn contains(layers: &[&Layer], id: &str) -> bool {
    layers.iter().any(|l| l.id == id)
}

#[derive(Debug, Clone, Copy)]
pub struct LayerCompatibilityResolver<'a> {
    declared: &'a [Layer],
    discovered: &'a [Layer],
}

impl<'a> LayerCompatibilityResolver<'a> {
    /// `declared` layers come with the solution and shadow discovered layers
    /// of the same id.
    pub fn new(declared: &'a [Layer], discovered: &'a [Layer]) -> Self {
        Self {
            declared,
            discovered,
        }
    }

    pub fn pool(&self) -> Vec<&'a Layer> {
        let mut pool: Vec<&'a Layer> = self.declared.iter().collect();
        for layer in self.discovered {
            if !contains(&pool, &layer.id) {
                pool.push(layer);
            }
        }
        pool
    }

    pub fn resolve(&self, context: &ContextId, referenced: &[&str]) -> LayerReport {
        let pool = self.pool();
        let mut report = LayerReport {
            available: pool.iter().map(|l| l.id.clone()).collect(),
            referenced: referenced.iter().map(|id| id.to_string()).collect(),
            ..LayerReport::default()
        };

        let candidates: Vec<&Layer> = pool.iter().copied().filter(|l| l.supports(context)).collect();
        let mut selected: Vec<&Layer> = Vec::new();

        for id in referenced {
            let Some(layer) = pool.iter().copied().find(|l| l.id == *id) else {
                report.conflicts.push(LayerConflict::new(id, ConflictKind::Unknown));
                continue;
            };
            if layer.supports(context) {
                if !contains(&selected, &layer.id) {
                    selected.push(layer);
                }
                continue;
            }

            let alternatives: Vec<&Layer> = match &layer.category {
                Some(category) => candidates
                    .iter()
                    .copied()
                    .filter(|c| c.category.as_ref() == Some(category) && c.id != layer.id)
                    .collect(),
                None => Vec::new(),
            };
            match (alternatives.as_slice(), &layer.category) {
                ([alternative], Some(category)) => {
                    debug!(layer = %layer.id, by = %alternative.id, "layer substituted");
                    if !contains(&selected, &alternative.id) {
                        selected.push(*alternative);
                    }
                    report.conflicts.push(LayerConflict::new(
                        &layer.id,
                        ConflictKind::Substituted {
                            by: alternative.id.clone(),
                            category: category.clone(),
                        },
                    ));
                }
                _ => report.conflicts.push(LayerConflict::new(
                    &layer.id,
                    ConflictKind::IncompatibleTarget {
                        target: context.target_type().unwrap_or_default().to_string(),
                        alternatives: alternatives.len(),
                    },
                )),
            }
        }

        let pool_index = slot_index(&candidates);
        loop {
            let selected_index = slot_index(&selected);
            let mut pulled: Vec<&Layer> = Vec::new();
            for consumer in &selected {
                for slot in consumer.consumes() {
                    if !providers(&selected_index, slot, &consumer.id).is_empty() {
                        continue;
                    }
                    if let [provider] = providers(&pool_index, slot, &consumer.id).as_slice() {
                        if !contains(&pulled, &provider.id) {
                            debug!(layer = %provider.id, slot, "provider pulled in");
                            pulled.push(*provider);
                        }
                    }
                }
            }
            if pulled.is_empty() {
                break;
            }
            selected.extend(pulled);
        }

        let selected_index = slot_index(&selected);
        let mut broken: Vec<&str> = Vec::new();
        for &consumer in &selected {
            for slot in consumer.consumes() {
                let found = providers(&selected_index, slot, &consumer.id);
                let kind = match found.len() {
                    1 => continue,
                    0 => {
                        let offered = providers(&pool_index, slot, &consumer.id);
                        if offered.len() > 1 {
                            ConflictKind::AmbiguousSlot {
                                slot: slot.to_string(),
                                providers: offered.iter().map(|l| l.id.clone()).collect(),
                            }
                        } else {
                            ConflictKind::UnsatisfiedSlot {
                                slot: slot.to_string(),
                            }
                        }
                    }
                    _ => ConflictKind::AmbiguousSlot {
                        slot: slot.to_string(),
                        providers: found.iter().map(|l| l.id.clone()).collect(),
                    },
                };
                if !broken.contains(&consumer.id.as_str()) {
                    broken.push(&consumer.id);
                }
                report.conflicts.push(LayerConflict::new(&consumer.id, kind));
            }
        }

        // A broken layer provides nothing; its consumers lose the slot.
        loop {
            let wired: Vec<&Layer> = selected
                .iter()
                .copied()
                .filter(|l| !broken.contains(&l.id.as_str()))
                .collect();
            let wired_index = slot_index(&wired);
            let mut lost: Vec<&str> = Vec::new();
            for &consumer in &wired {
                let unsatisfied = consumer
                    .consumes()
                    .find(|slot| providers(&wired_index, slot, &consumer.id).is_empty());
                if let Some(slot) = unsatisfied {
                    debug!(layer = %consumer.id, slot, "provider is not wired");
                    report.conflicts.push(LayerConflict::new(
                        &consumer.id,
                        ConflictKind::UnsatisfiedSlot {
                            slot: slot.to_string(),
                        },
                    ));
                    lost.push(&consumer.id);
                }
            }
            if lost.is_empty() {
                report.compatible = wired.into_iter().cloned().collect();
                break;
            }
            broken.extend(lost);
        }

        for conflict in report.conflicts.iter().filter(|c| c.is_fatal()) {
            warn!(context = %context, %conflict, "layer conflict");
        }
        report
    }
}

#[cfg(test)]
mod tests;

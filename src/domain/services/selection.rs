//! Selection policy
//!
//! Picks the ordered subset of the context universe to process from the
//! caller's patterns and an optional saved context set.

use tracing::{debug, warn};

use crate::domain::entities::{ContextDescriptor, ContextSet};
use crate::domain::value_objects::{ContextId, ContextIdError, ContextOrder};

/// Whether the caller asked for the saved context set, and what was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContextSetRequest {
    #[default]
    NotRequested,
    /// `None` when the set was requested but nothing is saved.
    Requested(Option<ContextSet>),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionRequest {
    pub patterns: Vec<String>,
    pub context_set: ContextSetRequest,
    pub order: ContextOrder,
}

impl SelectionRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn with_context_set(mut self, request: ContextSetRequest) -> Self {
        self.context_set = request;
        self
    }

    pub fn with_order(mut self, order: ContextOrder) -> Self {
        self.order = order;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub selected: Vec<ContextDescriptor>,
    /// Patterns (or pinned entries) that matched no context.
    pub missing_filters: Vec<String>,
    pub warnings: Vec<String>,
}

impl Selection {
    pub fn ids(&self) -> Vec<ContextId> {
        self.selected.iter().map(|d| d.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid context filter '{pattern}': {source}")]
    MalformedFilter {
        pattern: String,
        #[source]
        source: ContextIdError,
    },
}

/// Order the universe for display and processing.
pub fn ordered(universe: &[ContextDescriptor], order: ContextOrder) -> Vec<ContextDescriptor> {
    let mut contexts = universe.to_vec();
    if order == ContextOrder::Sorted {
        contexts.sort_by(|a, b| a.id.cmp(&b.id));
    }
    contexts
}

pub fn select(
    universe: &[ContextDescriptor],
    request: &SelectionRequest,
) -> Result<Selection, SelectionError> {
    let contexts = ordered(universe, request.order);
    let mut selection = Selection::default();

    if !request.patterns.is_empty() {
        let mut malformed = None;
        let mut patterns = Vec::new();
        for text in &request.patterns {
            match ContextId::parse(text) {
                Ok(pattern) => patterns.push((text, pattern)),
                Err(source) => {
                    warn!(pattern = %text, error = %source, "invalid context filter");
                    selection
                        .warnings
                        .push(format!("invalid context filter '{}': {}", text, source));
                    malformed.get_or_insert(SelectionError::MalformedFilter {
                        pattern: text.clone(),
                        source,
                    });
                }
            }
        }

        selection.selected = contexts
            .into_iter()
            .filter(|c| patterns.iter().any(|(_, p)| p.matches(&c.id)))
            .collect();
        for (text, pattern) in &patterns {
            if !selection.selected.iter().any(|c| pattern.matches(&c.id)) {
                warn!(pattern = %text, "context filter matches no context");
                selection.missing_filters.push((*text).clone());
            }
        }

        if selection.selected.is_empty() {
            if let Some(err) = malformed {
                return Err(err);
            }
        }
    } else {
        match &request.context_set {
            ContextSetRequest::Requested(Some(set)) if !set.is_empty() => {
                selection.selected = contexts
                    .into_iter()
                    .filter(|c| set.contexts.iter().any(|p| p.matches(&c.id)))
                    .collect();
                for pinned in &set.contexts {
                    if !selection.selected.iter().any(|c| pinned.matches(&c.id)) {
                        warn!(context = %pinned, "pinned context is not part of the solution");
                        selection.missing_filters.push(pinned.to_string());
                    }
                }
            }
            ContextSetRequest::Requested(_) => {
                warn!("unable to locate a saved context set, selecting all contexts");
                selection
                    .warnings
                    .push("unable to locate a saved context set, selecting all contexts".to_string());
                selection.selected = contexts;
            }
            ContextSetRequest::NotRequested => selection.selected = contexts,
        }
    }

    for context in &selection.selected {
        debug!(context = %context.id, "context selected");
    }
    Ok(selection)
}

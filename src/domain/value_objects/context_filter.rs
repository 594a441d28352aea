//! Include/exclude context patterns attached to declarations
//! (`for-context` / `not-for-context`).

use serde::{Deserialize, Serialize};

use super::ContextId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextFilter {
    #[serde(default, rename = "for-context", skip_serializing_if = "Vec::is_empty")]
    pub for_context: Vec<ContextId>,

    #[serde(default, rename = "not-for-context", skip_serializing_if = "Vec::is_empty")]
    pub not_for_context: Vec<ContextId>,
}

impl ContextFilter {
    pub fn only(patterns: Vec<ContextId>) -> Self {
        Self {
            for_context: patterns,
            not_for_context: Vec::new(),
        }
    }

    pub fn except(patterns: Vec<ContextId>) -> Self {
        Self {
            for_context: Vec::new(),
            not_for_context: patterns,
        }
    }

    pub fn applies_to(&self, context: &ContextId) -> bool {
        let included =
            self.for_context.is_empty() || self.for_context.iter().any(|p| p.matches(context));
        included && !self.not_for_context.iter().any(|p| p.matches(context))
    }
}

//! Context set entity
//!
//! A pinned, ordered selection of contexts together with the toolchain that
//! was selected when it was saved.

use crate::domain::value_objects::ContextId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSet {
    pub contexts: Vec<ContextId>,
    pub compiler: Option<String>,
}

impl ContextSet {
    pub fn new(contexts: Vec<ContextId>) -> Self {
        Self {
            contexts,
            compiler: None,
        }
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = Some(compiler.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
